use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod services;

use components::club_card_form::ClubCardForm;
use config::AppConfig;
use services::logging::init_tracing;

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| AppConfig::from_build_env());

    html! {
        <main class="app">
            <ClubCardForm config={(*config).clone()} />
        </main>
    }
}

fn main() {
    init_tracing();
    yew::Renderer::<App>::new().render();
}
