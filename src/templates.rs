use maud::{DOCTYPE, Markup, html};

use crate::auth::{RegisterErrors, RegisterForm, Session};
use crate::models::{Movie, MovieForm};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const LABEL_CLASS: &str = "block text-sm font-medium text-gray-700";

/// Resolves a stored image path against the TMDB image CDN. Paths that are
/// already absolute URLs pass through, including ones the creation form
/// slash-prefixed into `/http...`.
pub fn image_url(base: &str, path: &str, size: &str) -> Option<String> {
    if path.is_empty() {
        return None;
    }
    if let Some(rest) = path.strip_prefix('/') {
        if rest.starts_with("http") {
            return Some(rest.to_string());
        }
    }
    if path.starts_with("http") {
        return Some(path.to_string());
    }
    Some(format!("{}/{size}{path}", base.trim_end_matches('/')))
}

pub fn register_page(form: &RegisterForm, errors: &RegisterErrors) -> String {
    page(
        "Create Account",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-md w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-center text-gray-900" { "Create Account" }

                        form class="mt-6 space-y-5" method="post" action="/register" {
                            div {
                                label class=(LABEL_CLASS) for="username" { "Username" }
                                input class=(INPUT_CLASS) type="text" name="username" id="username"
                                    value=(form.username) placeholder="Enter your username"
                                    minlength="3" required;
                                @if let Some(msg) = &errors.username {
                                    p class="mt-1 text-sm text-red-600" { (msg) }
                                }
                            }

                            div {
                                label class=(LABEL_CLASS) for="email" { "Email" }
                                input class=(INPUT_CLASS) type="email" name="email" id="email"
                                    value=(form.email) placeholder="Enter your email" required;
                                @if let Some(msg) = &errors.email {
                                    p class="mt-1 text-sm text-red-600" { (msg) }
                                }
                            }

                            div {
                                label class=(LABEL_CLASS) for="password" { "Password" }
                                input class=(INPUT_CLASS) type="password" name="password" id="password"
                                    placeholder="Enter your password" minlength="6" required;
                                @if let Some(msg) = &errors.password {
                                    p class="mt-1 text-sm text-red-600" { (msg) }
                                }
                            }

                            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Register" }
                        }

                        div class="mt-6 border-t border-gray-200 pt-6 text-center" {
                            a class="inline-block rounded-md bg-gray-900 px-4 py-2 font-semibold text-white hover:bg-gray-700" href="/auth/github" { "Sign in with GitHub" }
                        }
                    }
                }
            }
        },
    )
}

pub fn catalogue_page(movies: &[Movie], user: Option<&Session>, image_base: &str) -> String {
    page(
        "All Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-6xl mx-auto px-6 py-10" {
                    div class="flex items-center justify-between gap-6" {
                        h1 class="text-3xl font-bold text-gray-900" { "All Movies" }
                        div class="flex items-center gap-4" {
                            @if let Some(user) = user {
                                span class="text-sm text-gray-600" { "@" (user.username) }
                                a class="text-sm text-blue-600 hover:text-blue-800" href="/logout" { "Sign out" }
                            }
                            a class="rounded-full bg-emerald-500 px-5 py-2 font-semibold text-white hover:bg-emerald-600" href="/catalogue/new" { "Add Movie" }
                        }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies yet. Add the first one." }
                        }
                    } @else {
                        div class="mt-10 grid gap-6 sm:grid-cols-2 lg:grid-cols-3" {
                            @for movie in movies {
                                (movie_card(movie, image_base))
                            }
                        }
                    }
                }
            }
        },
    )
}

fn movie_card(movie: &Movie, image_base: &str) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg overflow-hidden" {
            a href=(format!("/catalogue/{}", movie.id)) {
                @if let Some(url) = image_url(image_base, &movie.poster_path, "w500") {
                    img class="h-80 w-full object-cover" src=(url) alt=(movie.title);
                } @else {
                    div class="flex h-80 w-full items-center justify-center bg-gray-200 text-gray-500" { "No Image Available" }
                }
            }
            div class="p-4 text-center" {
                span class="text-xs text-gray-400" { "#" (movie.id) }
                h2 class="mt-1 text-lg font-semibold text-gray-900" { (movie.original_title) }
            }
            div class="flex justify-center gap-3 px-4 pb-5" {
                a class="rounded-full bg-sky-500 px-4 py-2 text-sm font-semibold text-white hover:bg-sky-600" href=(format!("/catalogue/{}", movie.id)) { "Read More" }
                form method="post" action=(format!("/catalogue/{}/delete", movie.id)) {
                    button class="rounded-full bg-red-500 px-4 py-2 text-sm font-semibold text-white hover:bg-red-600" type="submit" { "Delete" }
                }
            }
        }
    }
}

pub fn movie_page(movie: &Movie, image_base: &str) -> String {
    let year = movie.release_date.get(..4).unwrap_or("");

    page(
        &movie.title,
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-5xl mx-auto px-6 py-10" {
                    a class="text-sm text-blue-600 hover:text-blue-800" href="/catalogue" { "Back to catalogue" }

                    div class="mt-4 flex flex-col gap-8 bg-white shadow rounded-lg p-8 md:flex-row" {
                        div class="md:w-80 shrink-0" {
                            @if let Some(url) = image_url(image_base, &movie.poster_path, "w500") {
                                img class="w-full rounded-md shadow" src=(url) alt=(movie.title);
                            } @else {
                                div class="flex h-96 items-center justify-center rounded-md bg-gray-200 text-gray-500" { "Poster Not Available" }
                            }
                        }

                        div class="flex-1" {
                            h1 class="text-3xl font-bold text-gray-900" {
                                (movie.title)
                                @if !year.is_empty() {
                                    span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                                }
                            }

                            div class="mt-3 flex flex-wrap items-center gap-4 text-sm" {
                                span class="font-semibold text-amber-600" {
                                    "★ " (movie.vote_average) "/10 (" (movie.vote_count) " votes)"
                                }
                                span class="rounded bg-gray-100 px-2 py-1 text-gray-600" {
                                    "Popularity: " (format!("{:.1}", movie.popularity))
                                }
                            }

                            h3 class="mt-6 text-lg font-semibold text-gray-700" { "Original Title" }
                            p class="mt-1 text-gray-600" {
                                (movie.original_title) " (" (movie.original_language.to_uppercase()) ")"
                            }

                            h3 class="mt-6 text-lg font-semibold text-gray-700" { "Overview" }
                            p class="mt-1 leading-relaxed text-gray-600" { (movie.overview) }

                            h3 class="mt-6 text-lg font-semibold text-gray-700" { "Details" }
                            div class="mt-2 grid grid-cols-2 gap-4 text-sm md:grid-cols-4" {
                                (detail_item("Release Date", &movie.release_date))
                                (detail_item("Adult Content", if movie.adult { "Yes" } else { "No" }))
                                (detail_item("Runtime", &format!("{} minutes", movie.runtime)))
                                (detail_item("Genre Ids", &genre_ids_label(&movie.genre_ids)))
                            }
                        }
                    }
                }
            }
        },
    )
}

fn detail_item(label: &str, value: &str) -> Markup {
    html! {
        div {
            span class="block text-xs text-gray-400" { (label) }
            span class="text-gray-700" { (value) }
        }
    }
}

fn genre_ids_label(ids: &[i32]) -> String {
    if ids.is_empty() {
        return "N/A".to_string();
    }
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}

pub fn movie_form_page(form: &MovieForm, error: Option<&str>) -> String {
    page(
        "Add New Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-3xl mx-auto px-6 py-10" {
                    div class="text-center" {
                        h1 class="text-3xl font-bold text-gray-900" { "Add New Movie" }
                        p class="mt-2 text-gray-600" { "Fill in the details to add a new movie to the collection" }
                    }

                    div class="mt-8 bg-white shadow rounded-lg p-8" {
                        @if let Some(msg) = error {
                            div class="mb-6 rounded-md border-l-4 border-red-500 bg-red-50 p-4 text-red-700" { (msg) }
                        }

                        form class="grid gap-5 md:grid-cols-2" method="post" action="/catalogue/new" {
                            div {
                                label class=(LABEL_CLASS) for="title" {
                                    "Title " span class="text-red-500" { "*" }
                                }
                                input class=(INPUT_CLASS) type="text" name="title" id="title"
                                    value=(form.title) placeholder="The Shawshank Redemption" required;
                            }

                            div {
                                label class=(LABEL_CLASS) for="original_title" { "Original Title" }
                                input class=(INPUT_CLASS) type="text" name="original_title" id="original_title"
                                    value=(form.original_title) placeholder="Original title in native language";
                            }

                            div {
                                label class=(LABEL_CLASS) for="release_date" { "Release Date" }
                                input class=(INPUT_CLASS) type="date" name="release_date" id="release_date"
                                    value=(form.release_date);
                            }

                            div {
                                label class=(LABEL_CLASS) for="runtime" { "Runtime (minutes)" }
                                input class=(INPUT_CLASS) type="number" name="runtime" id="runtime"
                                    min="0" value=(form.runtime);
                            }

                            div {
                                label class=(LABEL_CLASS) for="vote_average" { "Rating (0-10)" }
                                input class=(INPUT_CLASS) type="number" name="vote_average" id="vote_average"
                                    min="0" max="10" step="0.1" value=(form.vote_average);
                            }

                            div {
                                label class=(LABEL_CLASS) for="vote_count" { "Vote Count" }
                                input class=(INPUT_CLASS) type="number" name="vote_count" id="vote_count"
                                    min="0" value=(form.vote_count);
                            }

                            div {
                                label class=(LABEL_CLASS) for="popularity" { "Popularity" }
                                input class=(INPUT_CLASS) type="number" name="popularity" id="popularity"
                                    step="0.1" value=(form.popularity);
                            }

                            div {
                                label class=(LABEL_CLASS) { "Adult Content" }
                                div class="mt-2 flex gap-6" {
                                    label class="flex items-center gap-2 text-gray-600" {
                                        input type="radio" name="adult" value="false" checked[form.adult != "true"];
                                        "No"
                                    }
                                    label class="flex items-center gap-2 text-gray-600" {
                                        input type="radio" name="adult" value="true" checked[form.adult == "true"];
                                        "Yes"
                                    }
                                }
                            }

                            div class="md:col-span-2" {
                                label class=(LABEL_CLASS) for="overview" { "Overview" }
                                textarea class=(INPUT_CLASS) name="overview" id="overview" rows="5"
                                    placeholder="A compelling movie description..." { (form.overview) }
                            }

                            div {
                                label class=(LABEL_CLASS) for="poster_path" { "Poster Image Path" }
                                input class=(INPUT_CLASS) type="text" name="poster_path" id="poster_path"
                                    value=(form.poster_path) placeholder="/yFHHfHcUgGAxziP1C3lLt0q2T4s.jpg";
                            }

                            div {
                                label class=(LABEL_CLASS) for="backdrop_path" { "Backdrop Image Path" }
                                input class=(INPUT_CLASS) type="text" name="backdrop_path" id="backdrop_path"
                                    value=(form.backdrop_path) placeholder="/2Nti3gYAX513wvhp8IiLL6ZDyOm.jpg";
                            }

                            div class="md:col-span-2" {
                                label class=(LABEL_CLASS) for="genres" {
                                    "Genres " span class="text-red-500" { "*" }
                                }
                                input class=(INPUT_CLASS) type="text" name="genres" id="genres"
                                    value=(form.genres) placeholder="Drama, Action" required;
                                p class="mt-2 text-xs text-gray-500" { "Comma-separated genre names." }
                            }

                            div class="md:col-span-2 text-right" {
                                a class="mr-4 text-sm text-gray-500 hover:text-gray-700" href="/catalogue" { "Cancel" }
                                button class="rounded-md bg-indigo-600 px-6 py-2 font-semibold text-white hover:bg-indigo-700" type="submit" { "Create Movie" }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/catalogue" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://image.tmdb.org/t/p";

    #[test]
    fn empty_path_has_no_url() {
        assert_eq!(image_url(BASE, "", "w500"), None);
    }

    #[test]
    fn relative_paths_join_the_cdn() {
        assert_eq!(
            image_url(BASE, "/abc.jpg", "w500").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        assert_eq!(
            image_url(BASE, "https://example.com/p.jpg", "w500").as_deref(),
            Some("https://example.com/p.jpg")
        );
    }

    #[test]
    fn slash_prefixed_urls_are_unwrapped() {
        // The creation form slash-prefixes everything, absolute URLs included.
        assert_eq!(
            image_url(BASE, "/https://example.com/p.jpg", "original").as_deref(),
            Some("https://example.com/p.jpg")
        );
    }
}
