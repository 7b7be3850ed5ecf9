//! Services section. Static content; not part of the simulation.

use yew::prelude::*;

#[function_component(Services)]
pub fn services() -> Html {
    html! {
        <section class="services">
            <h2>{ "What we do" }</h2>
            <div class="service-grid">
                <div class="service-card">
                    <h3>{ "Product Engineering" }</h3>
                    <p>{ "Design systems, frontends, and the APIs behind them." }</p>
                </div>
                <div class="service-card">
                    <h3>{ "Interactive Experiences" }</h3>
                    <p>{ "Physics, motion, and play where it earns its keep." }</p>
                </div>
                <div class="service-card">
                    <h3>{ "Performance Work" }</h3>
                    <p>{ "Profiling and rebuilding the slow paths." }</p>
                </div>
            </div>
        </section>
    }
}
