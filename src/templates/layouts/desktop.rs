use crate::templates::components::flash_banner;
use crate::templates::PageCtx;
use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, ctx: &PageCtx, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="icon" href="/static/favicon/favicon.ico";
                link rel="stylesheet" href="/static/main.css";
            }
            body {
              header class="flex items-center justify-between px-6 py-3 shadow" {
                  svg
                      xmlns="http://www.w3.org/2000/svg"
                      width="24"
                      height="24"
                      viewBox="0 0 24 24"
                      fill="none"
                      stroke="#fe424d"
                      stroke-width="2"
                      stroke-linecap="round"
                      stroke-linejoin="round"
                      class="icon icon-tabler icon-tabler-compass"
                  {
                      path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                      path d="M8 16l2 -6l6 -2l-2 6l-6 2" {}
                      path d="M3 12a9 9 0 1 0 18 0a9 9 0 1 0 -18 0" {}
                  }
                  nav {
                      ul {
                          li { a href="/" { "Home" } }
                          li { a href="/listings" { "Explore" } }
                          li { a href="/listings/new" { "List your place" } }
                      }
                  }

                  @match &ctx.user {
                      Some(user) => span class="text-base font-medium" { "Signed in as " strong { (user.username) } },
                      None => a href="/login" class="text-base font-medium hover:text-blue-600" { "Login" },
                  }
              }
              main class="container" {
                  (flash_banner(ctx.flash.as_ref()))
                  (content)
              }
            }
        }
    }
}
