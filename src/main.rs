//! Finance dashboard frontend using Yew.
//! Wires the upload controller, toasts and charts to the page.

use finance_dashboard::{
    cache, utils::format_currency, ApiClient, Config, ProcessingOption, RequestGeneration, SpendingPeriod,
    StagedFile, SubmitOutcome, UploadState,
};
use log::{debug, info};
use std::rc::Rc;
use yew::prelude::*;

mod chart;
mod components;
mod hooks;

use chart::{render_category_chart, render_spending_chart};
use components::{render_progress, render_summary, render_toasts, DropZone, OptionToggles, PeriodSelector};
use hooks::{use_toasts, use_upload_controller, ToastAction};

/// Helper to bump a refresh counter and trigger chart reloads
fn bump(counter: &UseStateHandle<usize>) {
    counter.set(counter.wrapping_add(1));
}

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    let config: Rc<Config> = use_memo((), |_| Config::default());
    let (toasts, sink) = use_toasts();
    let upload = use_upload_controller(config.clone(), sink.clone());
    let api = {
        let config = config.clone();
        let sink = sink.clone();
        use_memo((), move |_| ApiClient::new(config, Rc::new(sink)))
    };
    let period = use_state(SpendingPeriod::default);
    // Incremented after a successful upload so charts refetch
    let refresh = use_state(|| 0usize);
    let spending_generation = use_memo((), |_| RequestGeneration::default());
    let category_total = use_state(|| None::<f64>);

    // Spending chart follows the selected period
    {
        let api = api.clone();
        let generation = spending_generation.clone();
        use_effect_with((*period, *refresh), move |&(period, _)| {
            let ticket = generation.begin();
            wasm_bindgen_futures::spawn_local(async move {
                if let Ok(data) = api.spending_chart(period).await {
                    if generation.is_current(ticket) {
                        render_spending_chart(&data);
                    } else {
                        debug!("Dropping stale spending chart for {}", period.query_value());
                    }
                }
            });
            || ()
        });
    }

    {
        let api = api.clone();
        let category_total = category_total.clone();
        use_effect_with(*refresh, move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                if let Ok(data) = api.category_chart().await {
                    render_category_chart(&data);
                    category_total.set(Some(data.total()));
                }
            });
            || ()
        });
    }

    let snapshot = &upload.snapshot;
    let submitting = snapshot.state.is_submitting();

    let on_file = {
        let controller = upload.controller.clone();
        Callback::from(move |file: web_sys::File| {
            // rejection is already reported through the toast sink
            let _ = controller.select_file(StagedFile::from_browser(file));
        })
    };

    let on_toggle = {
        let controller = upload.controller.clone();
        Callback::from(move |(option, enabled): (ProcessingOption, bool)| {
            controller.set_option(option, enabled)
        })
    };

    let on_submit = {
        let controller = upload.controller.clone();
        let refresh = refresh.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let controller = controller.clone();
            let refresh = refresh.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let SubmitOutcome::Completed(summary) = controller.submit_to_backend().await {
                    info!("Refreshing charts after {} new transactions", summary.processed);
                    cache::clear();
                    bump(&refresh);
                }
            });
        })
    };

    let on_reset = {
        let controller = upload.controller.clone();
        Callback::from(move |_: MouseEvent| {
            controller.reset();
        })
    };

    let on_dismiss = {
        let dispatcher = toasts.dispatcher();
        Callback::from(move |id: u64| dispatcher.dispatch(ToastAction::Dismiss(id)))
    };

    let on_period = {
        let period = period.clone();
        Callback::from(move |p: SpendingPeriod| period.set(p))
    };

    html! {
        <div class="dashboard">
            { render_toasts(&toasts.toasts, &on_dismiss) }

            <section class="upload-panel">
                <h2>{ "Upload transactions" }</h2>
                <form onsubmit={on_submit}>
                    <DropZone staged={snapshot.staged.clone()} disabled={submitting} {on_file} />
                    <OptionToggles options={snapshot.options} disabled={submitting} {on_toggle} />

                    if let UploadState::Submitting { progress } = snapshot.state {
                        { render_progress(progress) }
                    }

                    <div class="upload-actions">
                        <button type="submit" class="btn-primary" disabled={!snapshot.submit_enabled}>
                            { if submitting { "Processing..." } else { "Upload & Process" } }
                        </button>
                        <button type="button" class="btn-secondary" disabled={submitting} onclick={on_reset}>
                            { "Reset" }
                        </button>
                    </div>
                </form>

                {
                    match &snapshot.state {
                        UploadState::Completed(summary) => render_summary(summary),
                        UploadState::Failed(message) => html! {
                            <div class="upload-result error">{ message.clone() }</div>
                        },
                        _ => html! {},
                    }
                }
            </section>

            <section class="charts">
                <div class="chart-card">
                    <div class="chart-header">
                        <h3>{ "Spending" }</h3>
                        <PeriodSelector current={*period} on_select={on_period} />
                    </div>
                    <canvas id="spending-chart"></canvas>
                </div>
                <div class="chart-card">
                    <div class="chart-header">
                        <h3>{ "By category" }</h3>
                        if let Some(total) = *category_total {
                            <span class="chart-total">{ format_currency(total) }</span>
                        }
                    </div>
                    <canvas id="category-chart"></canvas>
                </div>
            </section>
        </div>
    }
}

/// Entry point: initializes Yew renderer for the App component.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
