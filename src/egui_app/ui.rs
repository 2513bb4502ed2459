#![cfg(feature = "egui")]

use std::time::Duration;

use eframe::egui::{self, Align2, Color32, RichText, Sense};

use super::render::NodeRenderer;
use super::state::{InsertDialog, InsertTab, ViewerApp, STATIC_RESOURCE};
use super::text::highlight_label_job;
use super::geometry::to_diagram;
use crate::events::{DiagramEvent, PairwiseOverlaySource};
use crate::model::NodeKind;
use crate::validation;

/// One full UI pass. Called from `ViewerApp::update` each frame.
pub(crate) fn update(app: &mut ViewerApp, ctx: &egui::Context) {
    egui_extras::install_image_loaders(ctx);

    app.poll_network();
    app.refresh_resources_if_due();

    search_panel(app, ctx);
    settings_panel(app, ctx);
    canvas(app, ctx);
    insert_dialog_window(app, ctx);
    occurrences_window(app, ctx);

    // Keep polling while requests are in flight; otherwise wake up rarely so
    // the periodic resource refresh still fires.
    let delay = if app.any_pending() {
        Duration::from_millis(200)
    } else {
        Duration::from_secs(30)
    };
    ctx.request_repaint_after(delay);
}

fn search_panel(app: &mut ViewerApp, ctx: &egui::Context) {
    let bus = app.bus.clone();
    egui::TopBottomPanel::top("search").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Search:").strong());
            let resp = ui.add(
                egui::TextEdit::singleline(&mut app.search.query)
                    .hint_text("Search the diagram…"),
            );
            ui.label("Species:");
            let species = ui.add(
                egui::TextEdit::singleline(&mut app.search.species).desired_width(120.0),
            );
            if resp.changed() || species.changed() {
                app.run_search();
            }
        });

        if !app.search.facets.is_empty() {
            ui.label("Filter your results by type:");
            let tags: Vec<(String, u64, bool)> = app
                .search
                .facets
                .tags()
                .iter()
                .map(|f| (f.name.clone(), f.count, f.selected))
                .collect();
            let mut toggled: Option<String> = None;
            ui.horizontal_wrapped(|ui| {
                for (name, count, selected) in &tags {
                    if ui
                        .selectable_label(*selected, format!("{name} ({count})"))
                        .clicked()
                    {
                        toggled = Some(name.clone());
                    }
                }
            });
            if let Some(name) = toggled {
                app.search.facets.toggle(&name);
            }
        }

        let arguments = app.search.arguments.clone();
        let visible: Vec<_> = app
            .search
            .results
            .iter()
            .filter(|r| app.search.facets.is_visible(&r.facet))
            .cloned()
            .collect();
        if arguments.as_ref().is_some_and(|a| a.has_valid_query()) {
            ui.label(format!("{} result(s)", visible.len()));
            egui::ScrollArea::vertical().max_height(180.0).show(ui, |ui| {
                for result in &visible {
                    ui.horizontal(|ui| {
                        let job =
                            highlight_label_job(&result.display_name, arguments.as_ref());
                        let row = ui.add(egui::Label::new(job).sense(Sense::click()));
                        if row.clicked() {
                            app.selected = Some(result.node_id);
                        }
                        match result.facet.as_str() {
                            "Protein" => {
                                let btn =
                                    ui.small_button("⇄").on_hover_text("Pairwise overlay");
                                if btn.clicked() {
                                    bus.fire(&DiagramEvent::PairwiseOverlayRequested(
                                        PairwiseOverlaySource::Protein {
                                            uniprot: result.st_id.clone().unwrap_or_default(),
                                            gene_name: result.display_name.clone(),
                                        },
                                    ));
                                }
                            }
                            "Complex" => {
                                let btn =
                                    ui.small_button("⇄").on_hover_text("Pairwise overlay");
                                if btn.clicked() {
                                    bus.fire(&DiagramEvent::PairwiseOverlayRequested(
                                        PairwiseOverlaySource::Complex {
                                            node_id: result.node_id,
                                        },
                                    ));
                                }
                            }
                            _ => {}
                        }
                        ui.weak(&result.facet);
                    });
                }
            });
        }
    });
}

fn settings_panel(app: &mut ViewerApp, ctx: &egui::Context) {
    let bus = app.bus.clone();
    let resources = app.interactors.resources.clone();
    egui::SidePanel::right("settings")
        .default_width(230.0)
        .show(ctx, |ui| {
            ui.heading("Interactor Overlays");
            ui.label("Existing resources:");
            if ui
                .radio_value(
                    &mut app.interactors.selected,
                    STATIC_RESOURCE.to_owned(),
                    "Static (IntAct)",
                )
                .on_hover_text("Select IntAct as a resource")
                .changed()
            {
                bus.fire(&DiagramEvent::InteractorsResourceChanged {
                    resource: STATIC_RESOURCE.to_owned(),
                });
            }

            ui.label("PSICQUIC:");
            if app.interactors.loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Updating resources…");
                });
            } else {
                if let Some(error) = &app.interactors.error {
                    ui.colored_label(Color32::RED, error);
                }
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for resource in &resources {
                        let label = format_name(&resource.name);
                        if resource.active {
                            if ui
                                .radio_value(
                                    &mut app.interactors.selected,
                                    resource.name.clone(),
                                    label,
                                )
                                .on_hover_text(format!(
                                    "Select {} as a resource",
                                    resource.name
                                ))
                                .changed()
                            {
                                bus.fire(&DiagramEvent::InteractorsResourceChanged {
                                    resource: resource.name.clone(),
                                });
                            }
                        } else {
                            ui.add_enabled(false, egui::RadioButton::new(false, label))
                                .on_disabled_hover_text(format!(
                                    "{} is not currently available",
                                    resource.name
                                ));
                        }
                    }
                });
            }

            ui.separator();
            if ui.button("Add your data…").clicked() {
                app.insert_dialog = Some(InsertDialog::new());
            }
        });
}

fn canvas(app: &mut ViewerApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let avail = ui.available_rect_before_wrap();
        let resp = ui.interact(avail, ui.id().with("canvas"), Sense::click_and_drag());
        if resp.dragged() {
            app.pan += resp.drag_delta();
        }
        let scroll_y = ui.input(|i| i.raw_scroll_delta.y);
        if scroll_y.abs() > 0.0 && resp.hovered() {
            app.zoom = (app.zoom * (1.0 + scroll_y * 0.001)).clamp(0.05, 8.0);
        }
        if app.reset_view {
            app.zoom = 1.0;
            app.pan = egui::Vec2::ZERO;
            app.reset_view = false;
        }

        let factor = app.zoom;
        let offset = avail.min.to_vec2() + app.pan;
        let painter = ui.painter_at(avail);

        for node in &app.diagram.nodes {
            NodeRenderer::for_kind(node.kind).draw(&painter, node, factor, offset);
        }

        let hovered = resp.hover_pos().and_then(|p| {
            let pos = to_diagram(p, factor, offset);
            app.diagram
                .nodes
                .iter()
                .filter(|n| NodeRenderer::for_kind(n.kind).is_visible(n, factor))
                .find_map(|n| NodeRenderer::for_kind(n.kind).get_hovered(n, pos))
        });
        app.hovered = hovered;

        if let Some(hit) = app.hovered {
            if let Some(node) = app.diagram.node_by_id(hit.node_id) {
                NodeRenderer::for_kind(node.kind).highlight(&painter, node, factor, offset);
            }
        }
        if let Some(selected) = app.selected {
            if app.hovered.map(|h| h.node_id) != Some(selected) {
                if let Some(node) = app.diagram.node_by_id(selected) {
                    NodeRenderer::for_kind(node.kind)
                        .highlight(&painter, node, factor, offset);
                }
            }
        }

        let hover_text = app.hovered.and_then(|hit| {
            let node = app.diagram.node_by_id(hit.node_id)?;
            Some(match hit.resolve(node) {
                Some(attachment) => {
                    let what = attachment
                        .description
                        .clone()
                        .or_else(|| attachment.label.clone())
                        .unwrap_or_else(|| "attachment".to_owned());
                    format!("{}: {what}", node.display_name)
                }
                None => node.display_name.clone(),
            })
        });
        let resp = match hover_text {
            Some(text) => resp.on_hover_text(text),
            None => resp,
        };

        if resp.clicked() {
            app.selected = app.hovered.map(|h| h.node_id);
            let target = app
                .hovered
                .and_then(|h| app.diagram.node_by_id(h.node_id))
                .map(|n| {
                    (
                        n.st_id.clone().unwrap_or_else(|| n.display_name.clone()),
                        n.kind,
                    )
                });
            if let Some((molecule, kind)) = target {
                if matches!(kind, NodeKind::Chemical | NodeKind::Protein) {
                    app.query_occurrences(molecule, kind);
                }
            }
        }

        // Zoom controls, pinned to the canvas corner.
        egui::Area::new(ui.id().with("zoom_controls"))
            .fixed_pos(avail.left_top() + egui::Vec2::new(8.0, 8.0))
            .show(ui.ctx(), |ui| {
                egui::Frame::menu(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if ui.small_button("−").clicked() {
                            app.zoom = (app.zoom * 0.9).clamp(0.05, 8.0);
                        }
                        if ui.small_button("+").clicked() {
                            app.zoom = (app.zoom * 1.1).clamp(0.05, 8.0);
                        }
                        if ui.small_button("Reset").clicked() {
                            app.reset_view = true;
                        }
                        ui.label(format!("{}%", (app.zoom * 100.0).round() as i32));
                    });
                });
            });

        painter.text(
            avail.left_bottom() + egui::Vec2::new(8.0, -8.0),
            Align2::LEFT_BOTTOM,
            format!(
                "{} — {} nodes",
                app.diagram.display_name,
                app.diagram.nodes.len()
            ),
            egui::FontId::proportional(12.0),
            Color32::GRAY,
        );
    });
}

fn insert_dialog_window(app: &mut ViewerApp, ctx: &egui::Context) {
    let Some(mut dialog) = app.insert_dialog.take() else {
        return;
    };
    let service = app.content.clone();
    let mut open = dialog.open;
    egui::Window::new("Add your data")
        .open(&mut open)
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Name:");
                ui.add(
                    egui::TextEdit::singleline(&mut dialog.name)
                        .hint_text("Enter the name of your resource"),
                );
            });
            ui.horizontal(|ui| {
                ui.selectable_value(&mut dialog.tab, InsertTab::Url, "URL");
                ui.selectable_value(&mut dialog.tab, InsertTab::File, "File");
                ui.selectable_value(&mut dialog.tab, InsertTab::Content, "Copy & paste");
            });
            match dialog.tab {
                InsertTab::Url => {
                    ui.add(
                        egui::TextEdit::singleline(&mut dialog.url)
                            .hint_text("https://example.org/tuples.csv"),
                    );
                }
                InsertTab::File => {
                    ui.add(
                        egui::TextEdit::singleline(&mut dialog.file_path)
                            .hint_text("Path to a .txt, .csv or .tsv file"),
                    );
                }
                InsertTab::Content => {
                    ui.add(
                        egui::TextEdit::multiline(&mut dialog.content)
                            .hint_text("Paste your tab or comma separated tuples"),
                    );
                }
            }

            if let Some(error) = &dialog.error {
                ui.colored_label(Color32::RED, error);
            }
            for warning in &dialog.warnings {
                ui.colored_label(Color32::from_rgb(200, 150, 0), warning);
            }
            if let Some(token) = &dialog.submitted_token {
                ui.colored_label(Color32::DARK_GREEN, format!("Uploaded, token: {token}"));
            }

            ui.horizontal(|ui| {
                let submitting = dialog.slot.is_pending();
                if submitting {
                    ui.spinner();
                }
                if ui
                    .add_enabled(!submitting, egui::Button::new("Submit"))
                    .clicked()
                {
                    submit_dialog(&mut dialog, &service);
                }
                if ui.button("Cancel").clicked() {
                    dialog.slot.cancel();
                    dialog.open = false;
                }
            });
        });
    dialog.open = dialog.open && open;
    if dialog.open {
        app.insert_dialog = Some(dialog);
    }
}

/// Validate the active tab and, if everything passes, hand the submission to
/// the background slot. Validation failure blocks the request.
fn submit_dialog(dialog: &mut InsertDialog, service: &crate::content::ContentService) {
    dialog.error = None;
    dialog.warnings.clear();
    dialog.submitted_token = None;

    if let Err(e) = validation::validate_name(&dialog.name) {
        dialog.error = Some(e.to_string());
        return;
    }
    let name = dialog.name.clone();
    let service = service.clone();
    match dialog.tab {
        InsertTab::Url => {
            if let Err(e) = validation::validate_url(&dialog.url) {
                dialog.error = Some(e.to_string());
                return;
            }
            let url = dialog.url.clone();
            dialog
                .slot
                .spawn(move || service.submit_tuple_url(&name, &url));
        }
        InsertTab::File => {
            if let Err(e) = validation::validate_file(&dialog.file_path) {
                dialog.error = Some(e.to_string());
                return;
            }
            let path = std::path::PathBuf::from(dialog.file_path.clone());
            dialog
                .slot
                .spawn(move || service.submit_tuple_file(&name, &path));
        }
        InsertTab::Content => {
            if let Err(e) = validation::validate_content(&dialog.content) {
                dialog.error = Some(e.to_string());
                return;
            }
            let content = dialog.content.clone();
            dialog
                .slot
                .spawn(move || service.submit_tuple_content(&name, &content));
        }
    }
}

fn occurrences_window(app: &mut ViewerApp, ctx: &egui::Context) {
    let Some(mut popup) = app.occurrences.take() else {
        return;
    };
    let structure = app.structure.clone();
    let mut open = popup.open;
    egui::Window::new(format!("Pathways with {}", popup.molecule))
        .open(&mut open)
        .show(ctx, |ui| {
            if popup.slot.is_pending() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Looking up occurrences…");
                });
            } else if let Some(error) = &popup.error {
                ui.colored_label(Color32::RED, error);
            } else if popup.pathways.is_empty() {
                ui.weak("No pathways found");
            } else {
                egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                    for pathway in &popup.pathways {
                        let mark = if pathway.has_diagram { "◆" } else { "◇" };
                        ui.label(format!(
                            "{mark} {} — {}",
                            pathway.st_id, pathway.display_name
                        ));
                    }
                });
            }
            if let Some(image) = &structure {
                ui.separator();
                ui.add(
                    egui::Image::from_bytes(
                        format!("bytes://structure-{}.png", image.identifier),
                        image.png.clone(),
                    )
                    .max_width(200.0),
                );
            }
        });
    popup.open = popup.open && open;
    if popup.open {
        app.occurrences = Some(popup);
    } else {
        popup.slot.cancel();
    }
}

/// Capitalize the first character, but only when the whole name is
/// lowercase.
fn format_name(original: &str) -> String {
    if original.chars().any(char::is_uppercase) {
        original.to_owned()
    } else {
        let mut chars = original.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}
