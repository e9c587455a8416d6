//! The landing page introducing the app, with a link to the dashboard.

use maud::{Markup, html};

use crate::{endpoints, html::base, navigation::NavBar};

struct Feature {
    title: &'static str,
    description: &'static str,
}

const FEATURES: [Feature; 3] = [
    Feature {
        title: "Smart Analytics",
        description: "See where your money goes with monthly and per-category charts.",
    },
    Feature {
        title: "Private & Self-hosted",
        description: "Your expenses are stored in a single SQLite file on your own machine.",
    },
    Feature {
        title: "Easy CRUD",
        description: "Add, edit, delete, search and export expenses in a few clicks.",
    },
];

/// Display the landing page.
pub async fn get_landing_page() -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();

    let content = html! {
        (nav_bar)

        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl text-center lg:py-16"
            {
                h1
                    class="mb-4 text-4xl font-extrabold tracking-tight leading-none
                        text-gray-900 md:text-5xl lg:text-6xl dark:text-white"
                {
                    "Track Your Expenses Easily"
                }

                p
                    class="mb-8 text-lg font-normal text-gray-500 lg:text-xl
                        sm:px-16 lg:px-48 dark:text-gray-400"
                {
                    "Record what you spend, see it summarised by month and category,
                    and download it whenever you need it."
                }

                a
                    id="get-started"
                    href=(endpoints::DASHBOARD_VIEW)
                    class="inline-flex justify-center items-center py-3 px-5 text-base
                        font-medium text-center text-white rounded-lg bg-blue-700
                        hover:bg-blue-800 focus:ring-4 focus:ring-blue-300
                        dark:focus:ring-blue-900"
                {
                    "Get Started"
                }
            }
        }

        section class="px-4 pb-16 mx-auto max-w-screen-xl"
        {
            div id="features" class="grid gap-6 md:grid-cols-3"
            {
                @for feature in &FEATURES {
                    div
                        class="p-6 bg-white border border-gray-200 rounded-lg shadow-sm
                            dark:bg-gray-800 dark:border-gray-700"
                    {
                        h2
                            class="mb-2 text-xl font-bold tracking-tight text-gray-900
                                dark:text-white"
                        {
                            (feature.title)
                        }

                        p class="font-normal text-gray-700 dark:text-gray-400"
                        {
                            (feature.description)
                        }
                    }
                }
            }
        }
    };

    base("Home", &[], &content)
}
