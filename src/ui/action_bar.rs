use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::calendar::selection::{Mode, SelectionCommand, SelectionController};

/// Bottom bar shown while copying: hint, counts and the actions valid in the current mode
pub fn action_bar_ui(
    mut contexts: EguiContexts,
    controller: Res<SelectionController>,
    mut commands: MessageWriter<SelectionCommand>,
) -> Result {
    let mode = controller.mode();
    if mode == Mode::View {
        return Ok(());
    }

    egui::TopBottomPanel::bottom("selection_action_bar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(mode.hint()).strong());

                match mode {
                    Mode::Selecting | Mode::ConfirmCopy => {
                        ui.separator();
                        ui.label(format!("{} day(s) selected", controller.selected_count()));
                    }
                    Mode::PasteTarget => {
                        ui.separator();
                        ui.label(format!("Clipboard: {} day(s)", controller.clipboard().len()));
                        if let Some(preview) = controller.paste_preview() {
                            ui.separator();
                            ui.label(format!("Paste into {} ~ {}", preview.start(), preview.end()));
                        }
                    }
                    _ => {}
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✕").on_hover_text("Cancel (Esc)").clicked() {
                        commands.write(SelectionCommand::Cancel);
                    }

                    match mode {
                        Mode::ConfirmCopy => {
                            if ui.button(egui::RichText::new("Confirm copy").strong()).clicked() {
                                commands.write(SelectionCommand::Confirm);
                            }
                            if ui.button("Reselect").clicked() {
                                commands.write(SelectionCommand::Reselect);
                            }
                        }
                        Mode::PasteTarget => {
                            if ui.button("End").clicked() {
                                commands.write(SelectionCommand::End);
                            }
                            let paste = ui.add_enabled(
                                controller.paste_target().is_some(),
                                egui::Button::new(egui::RichText::new("Paste").strong()),
                            );
                            if paste.clicked() {
                                commands.write(SelectionCommand::Paste);
                            }
                        }
                        _ => {}
                    }
                });
            });
        });
    Ok(())
}
