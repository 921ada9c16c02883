use eframe::egui::{self, RichText, Ui};

use crate::data::EdgeRecord;
use crate::util::{display_timestamp, format_amount};

use super::super::ViewModel;

struct TransferRow {
    counterparty: String,
    amount: f64,
    timestamp: String,
}

impl TransferRow {
    fn sent(edge: &EdgeRecord) -> Self {
        Self {
            counterparty: edge.to.clone(),
            amount: edge.amount,
            timestamp: display_timestamp(&edge.timestamp),
        }
    }

    fn received(edge: &EdgeRecord) -> Self {
        Self {
            counterparty: edge.from.clone(),
            amount: edge.amount,
            timestamp: display_timestamp(&edge.timestamp),
        }
    }
}

fn transfer_list(ui: &mut Ui, salt: &str, title: &str, rows: &[TransferRow]) -> Option<String> {
    let total = rows.iter().map(|row| row.amount).sum::<f64>();
    ui.label(RichText::new(format!("{title} ({}, total {})", rows.len(), format_amount(total))).strong());

    if rows.is_empty() {
        ui.label("None.");
        return None;
    }

    let mut clicked = None;
    egui::ScrollArea::vertical()
        .id_salt(salt)
        .max_height(220.0)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for row in rows {
                ui.horizontal(|ui| {
                    if ui
                        .link(row.counterparty.as_str())
                        .on_hover_text("Select this account")
                        .clicked()
                    {
                        clicked = Some(row.counterparty.clone());
                    }
                    ui.label(format_amount(row.amount));
                    ui.small(row.timestamp.as_str());
                });
            }
        });
    clicked
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let Some(selected_id) = self.engine.selected().map(str::to_owned) else {
            ui.label("Click a node or pick one from the selector.");
            return;
        };

        if !self.data.contains_node(&selected_id) {
            ui.label("Selected node no longer exists in the current data.");
            return;
        }

        let sent = self
            .data
            .outgoing(&selected_id)
            .map(TransferRow::sent)
            .collect::<Vec<_>>();
        let received = self
            .data
            .incoming(&selected_id)
            .map(TransferRow::received)
            .collect::<Vec<_>>();

        ui.label(RichText::new(selected_id.as_str()).strong());
        let net = received.iter().map(|row| row.amount).sum::<f64>()
            - sent.iter().map(|row| row.amount).sum::<f64>();
        let net_text = if net < 0.0 {
            format!("-{}", format_amount(-net))
        } else {
            format_amount(net)
        };
        ui.label(format!("Net flow: {net_text}"));

        ui.separator();
        let mut picked = transfer_list(ui, "details_sent", "Sent", &sent);
        ui.separator();
        if let Some(id) = transfer_list(ui, "details_received", "Received", &received) {
            picked = Some(id);
        }

        if let Some(id) = picked {
            self.select_external(Some(id));
        }
    }
}
