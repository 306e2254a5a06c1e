use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn home_page() -> Markup {
    desktop_layout(
        "Rental Search",
        html! {
            h1 { "Find rentals priced below their Zestimate" }
            p { "Enter a city and state to fetch rental listings and compare asking rents against market-rent estimates." }

            form action="/search" method="get" {
                label {
                    "City "
                    input type="text" name="city" placeholder="Hoboken" required;
                }
                label {
                    "State "
                    input type="text" name="state" placeholder="NJ" required;
                }
                label {
                    "Bedrooms "
                    input type="number" name="beds_min" value="1" min="1";
                }
                label {
                    input type="checkbox" name="exact_bedrooms";
                    " Exact number of bedrooms"
                }
                label {
                    "Bathrooms "
                    input type="number" name="baths_min" value="1" min="1";
                }
                label {
                    input type="checkbox" name="exact_bathrooms";
                    " Exact number of bathrooms"
                }
                label {
                    "Min price "
                    input type="number" name="min_price" value="2500" min="1";
                }
                label {
                    "Max price "
                    input type="number" name="max_price" value="4000" min="1";
                }
                button type="submit" { "Search" }
            }
        },
    )
}
