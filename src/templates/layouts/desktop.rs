use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; margin: 0; color: #333; }
    header { display: flex; align-items: center; justify-content: space-between;
             padding: 12px 24px; box-shadow: 0 1px 4px rgba(0,0,0,0.2); }
    main { max-width: 960px; margin: 0 auto; padding: 24px; }
    form label { display: block; margin: 8px 0; }
    .summary { border: 2px solid #444; padding: 12px; margin: 16px 0; background: #f6f6f6; }
    .table-container { max-height: 400px; overflow-y: auto; border: 2px solid #444; }
    .table-container:hover { border-color: red; }
    table { width: 100%; border-collapse: collapse; }
    th, td { padding: 8px 12px; background: #eee; text-align: left; }
    th { position: sticky; top: 0; background: #ddd; }
    a { color: blue; text-decoration: underline; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    h3 { "Zillow Zestimate Area Analysis" }
                    nav {
                        a href="/" { "New Search" }
                    }
                }
                main {
                    (content)
                }
            }
        }
    }
}
