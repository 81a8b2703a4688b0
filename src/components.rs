//! Yew view components for the dashboard.
//!
//! Everything here renders from props; state lives in the upload controller
//! and the hooks in `hooks.rs`.

use crate::hooks::Toast;
use finance_dashboard::utils::format_file_size;
use finance_dashboard::{FileInfo, ProcessingOption, ProcessingOptions, SpendingPeriod, UploadSummary};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// File picker and drag-and-drop target.
#[derive(Properties, PartialEq)]
pub struct DropZoneProps {
    pub staged: Option<FileInfo>,
    pub disabled: bool,
    pub on_file: Callback<web_sys::File>,
}

#[function_component(DropZone)]
pub fn drop_zone(props: &DropZoneProps) -> Html {
    let dragging = use_state(|| false);

    let ondragover = {
        let dragging = dragging.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(true);
        })
    };
    let ondragleave = {
        let dragging = dragging.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(false);
        })
    };
    let ondrop = {
        let dragging = dragging.clone();
        let on_file = props.on_file.clone();
        let disabled = props.disabled;
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(false);
            if disabled {
                return;
            }
            if let Some(file) = e
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0))
            {
                on_file.emit(file);
            }
        })
    };
    let onchange = {
        let on_file = props.on_file.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                on_file.emit(file);
            }
            // allow picking the same file again after a reset
            input.set_value("");
        })
    };

    html! {
        <div class={classes!("drop-zone", dragging.then_some("drag-over"))}
            {ondragover} {ondragleave} {ondrop}>
            <input type="file" id="file-input" class="file-input"
                accept=".txt,.csv,.json,text/plain,text/csv,application/json"
                disabled={props.disabled}
                {onchange} />
            <label for="file-input" class="drop-zone-label">
                { "Drop a bank statement here or click to browse" }
                <span class="drop-zone-hint">{ "TXT, CSV or JSON, up to 16MB" }</span>
            </label>
            if let Some(info) = &props.staged {
                <div class="file-preview">
                    <span class="file-name">{ info.name.clone() }</span>
                    <span class="file-size">{ format_file_size(info.size) }</span>
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct OptionTogglesProps {
    pub options: ProcessingOptions,
    pub disabled: bool,
    pub on_toggle: Callback<(ProcessingOption, bool)>,
}

#[function_component(OptionToggles)]
pub fn option_toggles(props: &OptionTogglesProps) -> Html {
    html! {
        <div class="processing-options">
            { ProcessingOption::ALL.iter().map(|&option| {
                let on_toggle = props.on_toggle.clone();
                let onchange = Callback::from(move |e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    on_toggle.emit((option, input.checked()));
                });
                html! {
                    <label class="form-check" key={option.field_name()}>
                        <input type="checkbox"
                            checked={props.options.get(option)}
                            disabled={props.disabled}
                            {onchange} />
                        { option.label() }
                    </label>
                }
            }).collect::<Html>() }
        </div>
    }
}

pub fn render_progress(progress: f64) -> Html {
    let width = format!("width: {:.0}%", progress);
    html! {
        <div class="upload-progress">
            <div class="progress-bar" style={width} />
            <span class="progress-label">{ format!("Uploading... {:.0}%", progress) }</span>
        </div>
    }
}

/// Success panel. Estimated figures are labelled so nobody mistakes them
/// for numbers computed by the backend.
pub fn render_summary(summary: &UploadSummary) -> Html {
    html! {
        <div class="upload-result success">
            <p class="result-message">{ summary.message.clone() }</p>
            <div class="result-stats">
                { stat("Transactions processed", summary.processed.to_string()) }
                { stat("Categorized", summary.categorized.to_string()) }
                { stat("Merchants found", summary.merchants.to_string()) }
                { stat("Confidence", summary.confidence.clone()) }
            </div>
            if summary.estimated {
                <p class="result-note">{ "Categorized, merchant and confidence figures are estimates." }</p>
            }
        </div>
    }
}

fn stat(label: &str, value: String) -> Html {
    html! {
        <div class="stat">
            <span class="stat-value">{ value }</span>
            <span class="stat-label">{ label }</span>
        </div>
    }
}

pub fn render_toasts(toasts: &[Toast], on_dismiss: &Callback<u64>) -> Html {
    html! {
        <div class="toast-container">
            { toasts.iter().map(|toast| {
                let id = toast.id;
                let onclick = on_dismiss.reform(move |_: MouseEvent| id);
                html! {
                    <div key={id} class={classes!("toast", toast.severity.css_class())} role="alert">
                        <span class="toast-message">{ toast.message.clone() }</span>
                        <button class="toast-close" {onclick}>{ "×" }</button>
                    </div>
                }
            }).collect::<Html>() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PeriodSelectorProps {
    pub current: SpendingPeriod,
    pub on_select: Callback<SpendingPeriod>,
}

#[function_component(PeriodSelector)]
pub fn period_selector(props: &PeriodSelectorProps) -> Html {
    html! {
        <div class="period-selector">
            { SpendingPeriod::ALL.iter().map(|&period| {
                let onclick = props.on_select.reform(move |_: MouseEvent| period);
                let active = (period == props.current).then_some("active");
                html! {
                    <button class={classes!("btn-period", active)} {onclick}>
                        { period.label() }
                    </button>
                }
            }).collect::<Html>() }
        </div>
    }
}
