use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use eframe::egui;
use egui::{Align, Align2, Color32, Layout, RichText};
use habit_core::{
    metrics::BoardMetrics,
    overlay::Overlay,
    seed::BoardSeed,
    toast::{Toast, DEFAULT_TOAST_DURATION},
    view::{SortDirection, SortKey, SortSpec},
    BoardCommand, Column, ColumnKey, HabitService, Icon, MoveDirection, Row, RowId,
};
use tracing::{debug, info, warn};

use crate::theme::{icon_glyph, Theme};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub(crate) seed: Option<PathBuf>,
    pub(crate) theme: Theme,
    pub(crate) toast_duration: Duration,
    pub(crate) title: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = lookup("HABIT_SEED") {
            if !path.trim().is_empty() {
                info!(path = %path, "using seed file");
                config.seed = Some(PathBuf::from(path));
            }
        }
        if let Some(raw) = lookup("HABIT_THEME") {
            match Theme::parse(&raw) {
                Some(theme) => config.theme = theme,
                None => warn!(value = %raw, "unknown HABIT_THEME, keeping default"),
            }
        }
        if let Some(raw) = lookup("HABIT_TOAST_MS") {
            if let Ok(value) = raw.trim().parse::<u64>() {
                if value > 0 {
                    config.toast_duration = Duration::from_millis(value);
                }
            }
        }
        if let Some(title) = lookup("HABIT_TITLE") {
            if !title.trim().is_empty() {
                config.title = title.trim().to_string();
            }
        }
        Ok(config)
    }

    pub(crate) fn build_service(&self) -> Result<HabitService> {
        let mut builder = HabitService::builder();
        if let Some(path) = &self.seed {
            let seed = BoardSeed::load(path)?;
            builder = builder.with_seed(seed);
        }
        builder.build().context("failed to initialize habit board")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            theme: Theme::Dark,
            toast_duration: DEFAULT_TOAST_DURATION,
            title: "Weekly Habit Tracker".to_string(),
        }
    }
}

/// What the user asked for during one frame. Applied after rendering.
#[derive(Clone, Debug)]
enum Action {
    Command(BoardCommand),
    SetFilter(Option<ColumnKey>),
    SetSort(Option<SortSpec>),
    Search(String),
    ToggleSearch,
    ToggleOverlay(Overlay),
    DismissOverlay,
    ToggleTheme,
    BeginRename(RenameTarget),
    CancelRename,
    SubmitRename,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum RenameTarget {
    Row(RowId),
    Column(ColumnKey),
}

#[derive(Clone, Debug)]
struct RenameDraft {
    target: RenameTarget,
    text: String,
    focus_pending: bool,
}

/// Enter commits the draft; any other way of leaving the field drops it.
fn rename_field_action(lost_focus: bool, enter_pressed: bool) -> Option<Action> {
    match (lost_focus, enter_pressed) {
        (true, true) => Some(Action::SubmitRename),
        (true, false) => Some(Action::CancelRename),
        (false, _) => None,
    }
}

pub struct HabitBoardApp {
    service: HabitService,
    config: AppConfig,
    theme: Theme,
    overlay: Overlay,
    toast: Option<Toast>,
    show_search: bool,
    search_text: String,
    new_column_label: String,
    new_column_icon: Icon,
    new_row_label: String,
    rename: Option<RenameDraft>,
}

impl HabitBoardApp {
    fn new(ctx: &egui::Context, service: HabitService, config: AppConfig) -> Self {
        let theme = config.theme;
        ctx.set_visuals(theme.visuals());
        Self {
            service,
            config,
            theme,
            overlay: Overlay::None,
            toast: None,
            show_search: false,
            search_text: String::new(),
            new_column_label: String::new(),
            new_column_icon: Icon::Dumbbell,
            new_row_label: String::new(),
            rename: None,
        }
    }

    fn flash(&mut self, text: String, now: Instant) {
        if text.is_empty() {
            return;
        }
        self.toast = Some(Toast::new(text, now, self.config.toast_duration));
    }

    fn handle(&mut self, ctx: &egui::Context, action: Action, now: Instant) {
        match action {
            Action::Command(command) => self.dispatch(command, now),
            Action::SetFilter(Some(key)) => self.service.set_filter(key),
            Action::SetFilter(None) => self.service.clear_filter(),
            Action::SetSort(Some(sort)) => self.service.set_sort(sort),
            Action::SetSort(None) => self.service.clear_sort(),
            Action::Search(text) => self.service.set_search(text),
            Action::ToggleSearch => {
                self.show_search = !self.show_search;
                if !self.show_search {
                    self.search_text.clear();
                    self.service.clear_search();
                }
            }
            Action::ToggleOverlay(target) => {
                self.overlay.toggle(target);
                debug!(overlay = ?self.overlay, "overlay changed");
            }
            Action::DismissOverlay => self.overlay.dismiss(),
            Action::ToggleTheme => {
                self.theme = self.theme.toggle();
                ctx.set_visuals(self.theme.visuals());
                debug!(theme = ?self.theme, "theme switched");
            }
            Action::BeginRename(target) => {
                let text = match &target {
                    RenameTarget::Row(id) => self.service.board().row(*id).map(|row| row.label.clone()),
                    RenameTarget::Column(key) => self
                        .service
                        .board()
                        .columns()
                        .get(key)
                        .map(|column| column.label.clone()),
                };
                if let Some(text) = text {
                    self.rename = Some(RenameDraft {
                        target,
                        text,
                        focus_pending: true,
                    });
                }
            }
            Action::CancelRename => self.rename = None,
            Action::SubmitRename => {
                let Some(draft) = self.rename.take() else {
                    return;
                };
                let command = match draft.target {
                    RenameTarget::Row(row) => BoardCommand::RenameRow {
                        row,
                        label: draft.text,
                    },
                    RenameTarget::Column(column) => BoardCommand::RenameColumn {
                        column,
                        label: draft.text,
                    },
                };
                self.dispatch(command, now);
            }
        }
    }

    fn dispatch(&mut self, command: BoardCommand, now: Instant) {
        let Ok(status) = self.service.dispatch(command.clone()) else {
            return;
        };
        match &command {
            BoardCommand::AddColumn { .. } => {
                self.new_column_label.clear();
                self.new_column_icon = Icon::Dumbbell;
                self.overlay.dismiss();
            }
            BoardCommand::AddRow { .. } => {
                self.new_row_label.clear();
                self.overlay.dismiss();
            }
            BoardCommand::DeleteRow(id) => {
                self.overlay.forget_row(*id);
                if matches!(&self.rename, Some(draft) if draft.target == RenameTarget::Row(*id)) {
                    self.rename = None;
                }
            }
            BoardCommand::DeleteColumn(key) => {
                self.overlay.forget_column(key);
                if matches!(&self.rename, Some(draft) if draft.target == RenameTarget::Column(key.clone()))
                {
                    self.rename = None;
                }
            }
            BoardCommand::RenameRow { .. } | BoardCommand::RenameColumn { .. } => {
                self.rename = None;
            }
            _ => {}
        }
        self.flash(status, now);
    }

    fn render_header(&mut self, ui: &mut egui::Ui, metrics: &BoardMetrics, actions: &mut Vec<Action>) {
        let ctx = ui.ctx().clone();
        let visible: Vec<Column> = self.service.board().columns().visible().cloned().collect();
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.heading(format!("{} {}", icon_glyph(Icon::Activity), self.config.title));
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("+ New").on_hover_text("Add row").clicked() {
                    actions.push(Action::ToggleOverlay(Overlay::NewRow));
                }
                if ui
                    .button(self.theme.switch_glyph())
                    .on_hover_text("Toggle theme")
                    .clicked()
                {
                    actions.push(Action::ToggleTheme);
                }
                if ui.button("⚙").on_hover_text("Settings").clicked() {
                    actions.push(Action::ToggleOverlay(Overlay::Settings));
                }
                if ui
                    .selectable_label(self.show_search, "🔍")
                    .on_hover_text("Search")
                    .clicked()
                {
                    actions.push(Action::ToggleSearch);
                }
                if ui.button("⚡").on_hover_text("Toggle all habits").clicked() {
                    actions.push(Action::Command(BoardCommand::ToggleAll));
                }

                let sort_button = ui
                    .selectable_label(self.service.view().sort.is_some(), "⇅")
                    .on_hover_text("Sort");
                if sort_button.clicked() {
                    actions.push(Action::ToggleOverlay(Overlay::SortMenu));
                }
                if self.overlay == Overlay::SortMenu {
                    popup(&ctx, "sort_menu", sort_button.rect.left_bottom(), |ui| {
                        let sorts = [
                            SortSpec::new(SortKey::Label, SortDirection::Ascending),
                            SortSpec::new(SortKey::Label, SortDirection::Descending),
                            SortSpec::new(SortKey::Completion, SortDirection::Ascending),
                            SortSpec::new(SortKey::Completion, SortDirection::Descending),
                        ];
                        for (index, sort) in sorts.into_iter().enumerate() {
                            if index == 2 {
                                ui.separator();
                            }
                            if menu_item(ui, sort.describe()) {
                                actions.push(Action::SetSort(Some(sort)));
                                actions.push(Action::DismissOverlay);
                            }
                        }
                        ui.separator();
                        if menu_item(ui, "Clear sort") {
                            actions.push(Action::SetSort(None));
                            actions.push(Action::DismissOverlay);
                        }
                    });
                }

                let filter_button = ui
                    .selectable_label(self.service.view().filter.is_some(), "⏷ Filter")
                    .on_hover_text("Filter");
                if filter_button.clicked() {
                    actions.push(Action::ToggleOverlay(Overlay::FilterMenu));
                }
                if self.overlay == Overlay::FilterMenu {
                    popup(&ctx, "filter_menu", filter_button.rect.left_bottom(), |ui| {
                        if menu_item(ui, "👁 Show all rows") {
                            actions.push(Action::SetFilter(None));
                            actions.push(Action::DismissOverlay);
                        }
                        ui.separator();
                        for column in &visible {
                            let text = format!("{} Checked: {}", icon_glyph(column.icon), column.label);
                            if menu_item(ui, &text) {
                                actions.push(Action::SetFilter(Some(column.key.clone())));
                                actions.push(Action::DismissOverlay);
                            }
                        }
                    });
                }
            });
        });

        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("❤ Daily Habits").color(self.theme.muted()));
            if let Some(key) = &self.service.view().filter {
                let label = self
                    .service
                    .board()
                    .columns()
                    .get(key)
                    .map(|column| column.label.as_str())
                    .unwrap_or("?");
                if ui
                    .button(RichText::new(format!("Filtered: {label} ✕")).color(self.theme.accent()))
                    .clicked()
                {
                    actions.push(Action::SetFilter(None));
                }
            }
            if let Some(sort) = &self.service.view().sort {
                if ui
                    .button(RichText::new(format!("Sorted: {} ✕", sort.describe())).color(self.theme.accent()))
                    .clicked()
                {
                    actions.push(Action::SetSort(None));
                }
            }
        });

        if self.show_search {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search_text)
                    .hint_text("Search days...")
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                actions.push(Action::Search(self.search_text.clone()));
            }
        }

        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("{}/{} completed", metrics.checked, metrics.possible))
                    .color(self.theme.muted()),
            );
            ui.add(
                egui::ProgressBar::new(f32::from(metrics.percentage) / 100.0)
                    .text(format!("{}%", metrics.percentage)),
            );
        });
        ui.add_space(8.0);
    }

    fn render_table(
        &mut self,
        ui: &mut egui::Ui,
        rows: &[Row],
        metrics: &BoardMetrics,
        actions: &mut Vec<Action>,
    ) {
        let ctx = ui.ctx().clone();
        let visible: Vec<Column> = self.service.board().columns().visible().cloned().collect();
        let row_count = self.service.board().row_count();

        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("habit_grid")
                    .striped(true)
                    .num_columns(visible.len() + 3)
                    .spacing([16.0, 8.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Day").strong());
                        for column in &visible {
                            let header = ui.button(format!(
                                "{} {} ▾",
                                icon_glyph(column.icon),
                                column.label
                            ));
                            if header.clicked() {
                                actions.push(Action::ToggleOverlay(Overlay::ColumnMenu(
                                    column.key.clone(),
                                )));
                            }
                            if self.overlay == Overlay::ColumnMenu(column.key.clone()) {
                                self.column_menu(&ctx, column, header.rect.left_bottom(), actions);
                            }
                        }
                        if ui.button("+").on_hover_text("Add column").clicked() {
                            actions.push(Action::ToggleOverlay(Overlay::AddColumn));
                        }
                        ui.label("");
                        ui.end_row();

                        for row in rows {
                            self.row_label_cell(ui, row, actions);
                            for column in &visible {
                                let mut checked = row.value(&column.key);
                                if ui.checkbox(&mut checked, "").changed() {
                                    actions.push(Action::Command(BoardCommand::ToggleCell {
                                        row: row.id,
                                        column: column.key.clone(),
                                    }));
                                }
                            }
                            if ui.small_button("✔").on_hover_text("Check all for this day").clicked() {
                                actions.push(Action::Command(BoardCommand::CheckRow(row.id)));
                            }
                            let menu_button = ui.small_button("⋯");
                            if menu_button.clicked() {
                                actions.push(Action::ToggleOverlay(Overlay::RowMenu(row.id)));
                            }
                            if self.overlay == Overlay::RowMenu(row.id) {
                                self.row_menu(&ctx, row, menu_button.rect.left_bottom(), actions);
                            }
                            ui.end_row();
                        }

                        if rows.is_empty() {
                            let message = if self.service.view().is_narrowed() {
                                "No rows match your search or filter."
                            } else {
                                "No rows yet. Add one with + New."
                            };
                            ui.label(RichText::new(message).italics().color(self.theme.muted()));
                            ui.end_row();
                        }

                        ui.label(RichText::new("Total").color(self.theme.muted()));
                        for column in &visible {
                            let (checked, fill) = metrics
                                .total_for(&column.key)
                                .map(|total| (total.checked, total.fill))
                                .unwrap_or((0, 0.0));
                            ui.vertical(|ui| {
                                ui.label(
                                    RichText::new(format!("{checked}/{row_count}"))
                                        .small()
                                        .color(self.theme.muted()),
                                );
                                ui.add(egui::ProgressBar::new(fill).desired_width(64.0));
                            });
                        }
                        ui.end_row();
                    });
            });
    }

    fn row_label_cell(&mut self, ui: &mut egui::Ui, row: &Row, actions: &mut Vec<Action>) {
        let editing = matches!(&self.rename, Some(draft) if draft.target == RenameTarget::Row(row.id));
        if !editing {
            ui.label(row.label.as_str());
            return;
        }
        if let Some(draft) = self.rename.as_mut() {
            let response = ui.add(egui::TextEdit::singleline(&mut draft.text).desired_width(140.0));
            let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
            actions.extend(rename_field_action(response.lost_focus(), enter));
            if draft.focus_pending {
                response.request_focus();
                draft.focus_pending = false;
            }
        }
    }

    fn column_menu(
        &self,
        ctx: &egui::Context,
        column: &Column,
        anchor: egui::Pos2,
        actions: &mut Vec<Action>,
    ) {
        let danger = self.theme.danger();
        popup(ctx, ("column_menu", column.key.as_str()), anchor, |ui| {
            if menu_item(ui, "Sort A→Z") {
                actions.push(Action::SetSort(Some(SortSpec::new(
                    SortKey::Label,
                    SortDirection::Ascending,
                ))));
                actions.push(Action::DismissOverlay);
            }
            if menu_item(ui, "Sort Z→A") {
                actions.push(Action::SetSort(Some(SortSpec::new(
                    SortKey::Label,
                    SortDirection::Descending,
                ))));
                actions.push(Action::DismissOverlay);
            }
            ui.separator();
            let visibility = if column.visible { "Hide column" } else { "Show column" };
            if menu_item(ui, visibility) {
                actions.push(Action::Command(BoardCommand::ToggleColumnVisibility(
                    column.key.clone(),
                )));
                actions.push(Action::DismissOverlay);
            }
            if menu_item(ui, "Rename column") {
                actions.push(Action::BeginRename(RenameTarget::Column(column.key.clone())));
                actions.push(Action::ToggleOverlay(Overlay::Settings));
            }
            if danger_item(ui, "🗑 Delete column", danger) {
                actions.push(Action::Command(BoardCommand::DeleteColumn(column.key.clone())));
                actions.push(Action::DismissOverlay);
            }
        });
    }

    fn row_menu(&self, ctx: &egui::Context, row: &Row, anchor: egui::Pos2, actions: &mut Vec<Action>) {
        let danger = self.theme.danger();
        let id = row.id;
        popup(ctx, ("row_menu", id.raw()), anchor, |ui| {
            let entries = [
                ("✔ Check all", BoardCommand::CheckRow(id)),
                ("⟲ Clear row", BoardCommand::ClearRow(id)),
                ("⎘ Duplicate", BoardCommand::DuplicateRow(id)),
            ];
            for (label, command) in entries {
                if menu_item(ui, label) {
                    actions.push(Action::Command(command));
                    actions.push(Action::DismissOverlay);
                }
            }
            ui.separator();
            for (label, direction) in [("⬆ Move up", MoveDirection::Up), ("⬇ Move down", MoveDirection::Down)] {
                if menu_item(ui, label) {
                    actions.push(Action::Command(BoardCommand::MoveRow { row: id, direction }));
                    actions.push(Action::DismissOverlay);
                }
            }
            if menu_item(ui, "✏ Rename") {
                actions.push(Action::BeginRename(RenameTarget::Row(id)));
                actions.push(Action::DismissOverlay);
            }
            ui.separator();
            if danger_item(ui, "🗑 Delete row", danger) {
                actions.push(Action::Command(BoardCommand::DeleteRow(id)));
                actions.push(Action::DismissOverlay);
            }
        });
    }

    fn render_footer(&mut self, ui: &mut egui::Ui, metrics: &BoardMetrics, actions: &mut Vec<Action>) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!(
                    "{} rows · {}/{} checked · {}%",
                    self.service.board().row_count(),
                    metrics.checked,
                    metrics.possible,
                    metrics.percentage
                ))
                .small()
                .color(self.theme.muted()),
            );
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.small_button("⟲ Reset").clicked() {
                    actions.push(Action::Command(BoardCommand::ResetAll));
                }
            });
        });
    }

    fn render_modals(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        if !self.overlay.is_modal() {
            return;
        }
        match self.overlay.clone() {
            Overlay::AddColumn => self.add_column_modal(ctx, actions),
            Overlay::NewRow => self.new_row_modal(ctx, actions),
            Overlay::Settings => self.settings_modal(ctx, actions),
            _ => {}
        }
    }

    fn add_column_modal(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let mut open = true;
        let accent = self.theme.accent();
        modal("Add Habit Column").open(&mut open).show(ctx, |ui| {
            ui.label("Column name");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.new_column_label)
                    .hint_text("e.g. Hydration, Cold Shower..."),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            ui.add_space(8.0);
            ui.label("Icon");
            egui::Grid::new("icon_picker").num_columns(4).show(ui, |ui| {
                for (index, icon) in Icon::ALL.into_iter().enumerate() {
                    let text = format!("{} {}", icon_glyph(icon), icon.label());
                    let selected = self.new_column_icon == icon;
                    let text = if selected {
                        RichText::new(text).color(accent)
                    } else {
                        RichText::new(text)
                    };
                    if ui.selectable_label(selected, text).clicked() {
                        self.new_column_icon = icon;
                    }
                    if index % 4 == 3 {
                        ui.end_row();
                    }
                }
            });
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let add = ui.button("Add column").clicked();
                if ui.button("Cancel").clicked() {
                    actions.push(Action::DismissOverlay);
                }
                if add || submitted {
                    actions.push(Action::Command(BoardCommand::AddColumn {
                        label: self.new_column_label.clone(),
                        icon: self.new_column_icon,
                    }));
                }
            });
        });
        if !open {
            actions.push(Action::DismissOverlay);
        }
    }

    fn new_row_modal(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let mut open = true;
        modal("Add New Row").open(&mut open).show(ctx, |ui| {
            ui.label("Row label");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.new_row_label)
                    .hint_text("e.g. Monday, Day 8, Week 2..."),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let add = ui.button("Add row").clicked();
                if ui.button("Cancel").clicked() {
                    actions.push(Action::DismissOverlay);
                }
                if add || submitted {
                    actions.push(Action::Command(BoardCommand::AddRow {
                        label: self.new_row_label.clone(),
                    }));
                }
            });
        });
        if !open {
            actions.push(Action::DismissOverlay);
        }
    }

    fn settings_modal(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let mut open = true;
        let columns: Vec<Column> = self.service.board().columns().iter().cloned().collect();
        let danger = self.theme.danger();
        let muted = self.theme.muted();
        modal("Settings").open(&mut open).show(ctx, |ui| {
            ui.label(RichText::new("Columns").strong());
            egui::Grid::new("settings_columns").num_columns(4).show(ui, |ui| {
                for column in &columns {
                    ui.label(icon_glyph(column.icon));
                    let editing = matches!(
                        &self.rename,
                        Some(draft) if draft.target == RenameTarget::Column(column.key.clone())
                    );
                    match self.rename.as_mut() {
                        Some(draft) if editing => {
                            let response = ui.text_edit_singleline(&mut draft.text);
                            let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
                            actions.extend(rename_field_action(response.lost_focus(), enter));
                            if draft.focus_pending {
                                response.request_focus();
                                draft.focus_pending = false;
                            }
                        }
                        _ => {
                            let text = if column.visible {
                                RichText::new(&column.label)
                            } else {
                                RichText::new(&column.label).color(muted)
                            };
                            ui.label(text);
                        }
                    }
                    ui.horizontal(|ui| {
                        if editing {
                            if ui.small_button("Save").clicked() {
                                actions.push(Action::SubmitRename);
                            }
                            if ui.small_button("Cancel").clicked() {
                                actions.push(Action::CancelRename);
                            }
                        } else if ui.small_button("✏").on_hover_text("Rename").clicked() {
                            actions.push(Action::BeginRename(RenameTarget::Column(column.key.clone())));
                        }
                        let eye = if column.visible { "👁" } else { "🚫" };
                        let hint = if column.visible { "Hide" } else { "Show" };
                        if ui.small_button(eye).on_hover_text(hint).clicked() {
                            actions.push(Action::Command(BoardCommand::ToggleColumnVisibility(
                                column.key.clone(),
                            )));
                        }
                        if ui
                            .small_button(RichText::new("🗑").color(danger))
                            .on_hover_text("Delete column")
                            .clicked()
                        {
                            actions.push(Action::Command(BoardCommand::DeleteColumn(
                                column.key.clone(),
                            )));
                        }
                    });
                    ui.end_row();
                }
            });
            ui.separator();
            ui.horizontal(|ui| {
                ui.label("Theme");
                let label = match self.theme {
                    Theme::Dark => "Dark",
                    Theme::Light => "Light",
                };
                if ui.button(format!("{} {label}", self.theme.switch_glyph())).clicked() {
                    actions.push(Action::ToggleTheme);
                }
            });
            ui.separator();
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new("Reset All").strong());
                    ui.label(RichText::new("Uncheck every habit on every row").small().color(muted));
                });
                if ui.button(RichText::new("Reset").color(danger)).clicked() {
                    actions.push(Action::Command(BoardCommand::ResetAll));
                    actions.push(Action::DismissOverlay);
                }
            });
        });
        if !open {
            actions.push(Action::DismissOverlay);
            actions.push(Action::CancelRename);
        }
    }

    fn render_toast(&mut self, ctx: &egui::Context, now: Instant) {
        let Some(toast) = &self.toast else {
            return;
        };
        if toast.is_expired(now) {
            self.toast = None;
            return;
        }
        let text = toast.text.clone();
        egui::Area::new(egui::Id::new("toast"))
            .order(egui::Order::Tooltip)
            .anchor(Align2::RIGHT_TOP, [-16.0, 16.0])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(RichText::new(text).strong());
                });
            });
        ctx.request_repaint_after(toast.remaining(now));
    }
}

impl eframe::App for HabitBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let mut actions: Vec<Action> = Vec::new();
        let metrics = self.service.metrics();
        let rows: Vec<Row> = self.service.projection().into_iter().cloned().collect();

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if self.overlay.is_open() {
                actions.push(Action::DismissOverlay);
            }
            actions.push(Action::CancelRename);
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.render_header(ui, &metrics, &mut actions);
        });
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            self.render_footer(ui, &metrics, &mut actions);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_table(ui, &rows, &metrics, &mut actions);
        });
        self.render_modals(ctx, &mut actions);

        let changed = !actions.is_empty();
        for action in actions {
            self.handle(ctx, action, now);
        }
        self.render_toast(ctx, now);
        if changed {
            ctx.request_repaint();
        }
    }
}

pub fn run(config: AppConfig) -> Result<()> {
    info!("starting egui runtime");
    let service = config.build_service()?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size([980.0, 680.0]),
        ..Default::default()
    };
    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(HabitBoardApp::new(&cc.egui_ctx, service, config)))),
    )
    .map_err(|err| anyhow!("{err}"))
}

fn modal<'open>(title: &str) -> egui::Window<'open> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
}

fn popup(
    ctx: &egui::Context,
    id: impl std::hash::Hash,
    anchor: egui::Pos2,
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    egui::Area::new(egui::Id::new(id))
        .order(egui::Order::Foreground)
        .fixed_pos(anchor)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_min_width(180.0);
                add_contents(ui);
            });
        });
}

fn menu_item(ui: &mut egui::Ui, label: &str) -> bool {
    ui.add(egui::Button::new(label).frame(false)).clicked()
}

fn danger_item(ui: &mut egui::Ui, label: &str, color: Color32) -> bool {
    ui.add(egui::Button::new(RichText::new(label).color(color)).frame(false))
        .clicked()
}
