//! Stats strip with the three stat-card physics targets.

use yew::prelude::*;

struct Stat {
    value: &'static str,
    label: &'static str,
    target: &'static str,
}

const STATS: [Stat; 3] = [
    Stat {
        value: "120+",
        label: "Projects shipped",
        target: "stat-card-1",
    },
    Stat {
        value: "40ms",
        label: "Median page load",
        target: "stat-card-2",
    },
    Stat {
        value: "9 yrs",
        label: "Building for the web",
        target: "stat-card-3",
    },
];

#[function_component(Stats)]
pub fn stats() -> Html {
    html! {
        <section class="stats">
            {
                STATS.iter().map(|stat| html! {
                    <div class="stat-card" data-physics={stat.target}>
                        <span class="stat-value">{ stat.value }</span>
                        <span class="stat-label">{ stat.label }</span>
                    </div>
                }).collect::<Html>()
            }
        </section>
    }
}
