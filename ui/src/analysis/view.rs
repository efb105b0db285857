use std::rc::Rc;

use dioxus::logger::tracing::{debug, info, warn};
use dioxus::prelude::*;

use crate::components::toast::{use_toaster, Toaster};
use crate::core::config::ClientConfig;
use crate::core::download::download_image;
use crate::core::platform;
use crate::t;

use super::params::FieldKind;
use super::render::{self, ReportSection, StatCard};
use super::{
    fetch_columns, fetch_operation, AnalysisData, AnalysisSession, Completion, ExportAction,
    InfoItem, LoadTicket, Operation, PanelState, Selection,
};

const EXPORT_SUCCESS: &str = "Visualization exported successfully!";
const NOTHING_TO_EXPORT: &str = "No visualization to export";

#[component]
pub fn AnalysisView(file_id: String) -> Element {
    let config = use_context::<ClientConfig>();
    let toaster = use_toaster();
    let mut session = use_signal({
        let api_root = config.api_root.clone();
        let file_id = file_id.clone();
        move || AnalysisSession::new(api_root, file_id)
    });

    use_hook({
        let api_root = config.api_root.clone();
        let file_id = file_id.clone();
        move || {
            select_operation(session, toaster, Operation::Table);
            spawn(async move {
                match fetch_columns(&api_root, &file_id).await {
                    Ok(columns) => {
                        if let Ok(mut current) = session.try_write() {
                            current.set_columns(columns);
                        }
                    }
                    Err(err) => {
                        warn!("column list for {file_id} unavailable: {err}");
                        toaster.warning(format!("Could not load column list: {err}"));
                    }
                }
            });
        }
    });

    let _escape = use_hook(move || {
        Rc::new(platform::listen_for_escape(move || {
            if session.peek().fullscreen() {
                session.with_mut(|s| s.exit_fullscreen());
            }
        }))
    });

    let snapshot = session();
    let active = snapshot.active();
    let fullscreen = snapshot.fullscreen();
    let viz_class = if fullscreen {
        "viz-container fullscreen"
    } else {
        "viz-container"
    };
    let fullscreen_icon = if fullscreen { "fa-compress" } else { "fa-expand" };

    rsx! {
        div { class: "analysis-layout",
            aside { class: "analysis-sidebar",
                h3 { class: "analysis-sidebar__title", {t!("analysis-operations")} }
                div { class: "operation-list",
                    for op in Operation::ALL {
                        button {
                            key: "{op}",
                            r#type: "button",
                            class: if op == active { "operation-btn active" } else { "operation-btn" },
                            "data-operation": op.name(),
                            onclick: move |_| select_operation(session, toaster, op),
                            i { class: "fas {op.icon()}" }
                            span { "{op.label()}" }
                        }
                    }
                }

                if snapshot.params_open() {
                    {parameter_panel(session, toaster, &snapshot)}
                }
            }

            section { class: "{viz_class}",
                div { class: "viz-header",
                    h2 { class: "viz-title",
                        match snapshot.titled() {
                            Some(op) => rsx! {
                                i { class: "fas {op.icon()}" }
                                " {op.title()}"
                            },
                            None => rsx! { {t!("analysis-placeholder-title")} },
                        }
                    }
                    div { class: "viz-actions",
                        button {
                            r#type: "button",
                            class: "button button--ghost",
                            title: t!("analysis-export"),
                            onclick: move |_| export_current(session, toaster),
                            i { class: "fas fa-download" }
                        }
                        button {
                            r#type: "button",
                            class: "button button--ghost",
                            title: t!("analysis-fullscreen"),
                            onclick: move |_| session.with_mut(|s| s.toggle_fullscreen()),
                            i { class: "fas {fullscreen_icon}" }
                        }
                    }
                }

                div { class: "viz-body",
                    {result_panel(toaster, snapshot.panel())}
                }

                {info_panel(snapshot.info_items())}
            }
        }
    }
}

fn select_operation(mut session: Signal<AnalysisSession>, toaster: Toaster, op: Operation) {
    match session.with_mut(|s| s.select(op)) {
        Selection::Load(ticket) => spawn_load(session, toaster, ticket),
        Selection::NeedsParameters => debug!("waiting for {op} parameters"),
    }
}

fn spawn_load(session: Signal<AnalysisSession>, toaster: Toaster, ticket: LoadTicket) {
    debug!(generation = ticket.generation, "GET {}", ticket.url);
    spawn(async move {
        let outcome = fetch_operation(&ticket).await;
        match settle(session, &ticket, outcome) {
            Some(Completion::Rendered) => info!("rendered {}", ticket.operation),
            Some(Completion::Failed(message)) => {
                warn!("{} failed: {message}", ticket.operation);
                toaster.error(message);
            }
            Some(Completion::Stale) => debug!(
                generation = ticket.generation,
                "dropping superseded {} response", ticket.operation
            ),
            None => debug!("dashboard closed before {} returned", ticket.operation),
        }
    });
}

/// Hand a finished load to the session. `None` once the dashboard is unmounted.
fn settle(
    mut session: Signal<AnalysisSession>,
    ticket: &LoadTicket,
    outcome: Result<AnalysisData, String>,
) -> Option<Completion> {
    let mut current = session.try_write().ok()?;
    Some(current.complete(ticket, outcome))
}

fn export_current(session: Signal<AnalysisSession>, toaster: Toaster) {
    let action = session.peek().export(platform::today_utc());
    match action {
        ExportAction::Download { filename, payload } => {
            match download_image(&payload, &filename) {
                Ok(_) => toaster.success(EXPORT_SUCCESS),
                Err(err) => toaster.error(err),
            }
        }
        ExportAction::NothingToExport => toaster.warning(NOTHING_TO_EXPORT),
    }
}

fn parameter_panel(
    mut session: Signal<AnalysisSession>,
    toaster: Toaster,
    snapshot: &AnalysisSession,
) -> Element {
    let fields = snapshot.fields().to_vec();
    let values: Vec<String> = fields
        .iter()
        .map(|field| snapshot.value(field.name).to_string())
        .collect();

    rsx! {
        div { id: "param-panel", class: "param-panel",
            h3 { class: "analysis-sidebar__title", {t!("analysis-parameters")} }
            for (field, current) in fields.into_iter().zip(values) {
                div { key: "{field.name}", class: "param-group",
                    label { r#for: "param-{field.name}", "{field.label}" }
                    match field.kind {
                        FieldKind::Select { options, empty_label } => rsx! {
                            select {
                                id: "param-{field.name}",
                                value: "{current}",
                                onchange: move |evt: FormEvent| {
                                    session.with_mut(|s| s.set_parameter(field.name, evt.value()));
                                },
                                if let Some(empty) = empty_label {
                                    option { value: "", selected: current.is_empty(), "{empty}" }
                                }
                                for column in options {
                                    option {
                                        key: "{column}",
                                        value: "{column}",
                                        selected: column == current,
                                        "{column}"
                                    }
                                }
                            }
                        },
                        FieldKind::Number { min, max, .. } => rsx! {
                            input {
                                id: "param-{field.name}",
                                r#type: "number",
                                min: "{min}",
                                max: "{max}",
                                value: "{current}",
                                oninput: move |evt: FormEvent| {
                                    session.with_mut(|s| s.set_parameter(field.name, evt.value()));
                                },
                            }
                        },
                    }
                }
            }
            button {
                r#type: "button",
                id: "apply-params",
                class: "button button--primary",
                onclick: move |_| {
                    let ticket = session.with_mut(|s| s.apply_parameters());
                    spawn_load(session, toaster, ticket);
                },
                {t!("analysis-apply")}
            }
        }
    }
}

fn result_panel(toaster: Toaster, panel: &PanelState) -> Element {
    match panel {
        PanelState::Idle => rsx! {
            p { class: "viz-placeholder", {t!("analysis-placeholder")} }
        },
        PanelState::Loading => rsx! {
            div { class: "spinner-wrapper",
                div { class: "spinner" }
                p { {t!("analysis-loading")} }
            }
        },
        PanelState::Failed(message) => rsx! {
            div { class: "error-message",
                i { class: "fas fa-exclamation-circle" }
                span { "{message}" }
            }
        },
        PanelState::Ready(data) => render_data(toaster, data),
    }
}

fn render_data(toaster: Toaster, data: &AnalysisData) -> Element {
    match data {
        AnalysisData::Table(table) => rsx! {
            {stat_grid(render::table_cards(table))}
            div { class: "table-wrapper", dangerous_inner_html: "{table.html}" }
        },
        AnalysisData::Statistics(stats) => report(toaster, render::statistics_sections(stats)),
        AnalysisData::Eda(eda) => report(toaster, render::eda_sections(eda)),
        chart => match chart.primary_image() {
            Some(image) => rsx! {
                img {
                    id: "current-viz-image",
                    src: render::image_src(image),
                    alt: "Visualization",
                }
            },
            None => rsx! {},
        },
    }
}

fn stat_grid(cards: Vec<StatCard>) -> Element {
    rsx! {
        div { class: "stats-grid",
            for card in cards {
                div { class: "stat-card",
                    div { class: "stat-value", "{card.value}" }
                    div { class: "stat-label", "{card.label}" }
                }
            }
        }
    }
}

fn report(toaster: Toaster, sections: Vec<ReportSection>) -> Element {
    rsx! {
        div { class: "eda-report",
            for section in sections {
                div { class: "eda-section",
                    {report_section(toaster, section)}
                }
            }
        }
    }
}

fn report_section(toaster: Toaster, section: ReportSection) -> Element {
    match section {
        ReportSection::Overview(cards) => rsx! {
            h3 { class: "eda-section-title",
                i { class: "fas fa-info-circle" }
                " {render::OVERVIEW_TITLE}"
            }
            {stat_grid(cards)}
        },
        ReportSection::Image { title, kind, image } => {
            let src = render::image_src(&image);
            let filename = format!("{kind}.png");
            rsx! {
                h3 { class: "eda-section-title",
                    i { class: "fas fa-chart-bar" }
                    " {title}"
                }
                img {
                    src: "{src}",
                    alt: "{kind}",
                    class: "eda-image",
                    title: "Click to download",
                    onclick: move |_| {
                        if let Err(err) = download_image(&image, &filename) {
                            toaster.error(err);
                        }
                    },
                }
            }
        }
        ReportSection::Html { title, icon, html } => rsx! {
            h3 { class: "eda-section-title",
                i { class: "fas {icon}" }
                " {title}"
            }
            div { class: "table-wrapper", dangerous_inner_html: "{html}" }
        },
    }
}

fn info_panel(items: Vec<InfoItem>) -> Element {
    if items.is_empty() {
        return rsx! {};
    }
    rsx! {
        div { id: "viz-info", class: "viz-info",
            for item in items {
                div { class: "info-item",
                    span { class: "info-label", "{item.label}" }
                    span { class: "info-value", "{item.value}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use dioxus::dioxus_core::VirtualDom;

    use super::*;

    thread_local! {
        static MOUNTED: Cell<Option<Signal<AnalysisSession>>> = const { Cell::new(None) };
    }

    #[allow(non_snake_case)]
    fn Dashboard() -> Element {
        let session = use_signal(|| AnalysisSession::new("/api", "7"));
        MOUNTED.with(|slot| slot.set(Some(session)));
        rsx! { div {} }
    }

    fn mount() -> (VirtualDom, Signal<AnalysisSession>) {
        let mut dom = VirtualDom::new(Dashboard);
        dom.rebuild_in_place();
        let session = MOUNTED
            .with(|slot| slot.take())
            .expect("dashboard stored its session");
        (dom, session)
    }

    fn table_ticket(dom: &VirtualDom, mut session: Signal<AnalysisSession>) -> LoadTicket {
        dom.in_runtime(|| match session.write().select(Operation::Table) {
            Selection::Load(ticket) => ticket,
            other => panic!("table should load immediately, got {other:?}"),
        })
    }

    #[test]
    fn settles_while_the_dashboard_is_mounted() {
        let (dom, session) = mount();
        let ticket = table_ticket(&dom, session);

        let completion = dom.in_runtime(|| settle(session, &ticket, Err("boom".into())));
        assert_eq!(completion, Some(Completion::Failed("boom".into())));
    }

    #[test]
    fn late_completion_after_unmount_is_dropped() {
        let (dom, session) = mount();
        let ticket = table_ticket(&dom, session);
        drop(dom);

        assert_eq!(settle(session, &ticket, Err("late".into())), None);
    }
}
