use crate::fireworks::Fireworks;
use crate::models::{ListFilter, MainTab, Settings, Todo, PROJECT_COLORS};
use crate::store::{ProjectList, TodoList};
use crate::utils;
use eframe::egui;
use egui::{Color32, RichText, TextureHandle};
use std::path::Path;
use std::time::Duration;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const TODO_FILE: &str = "todos.txt";
pub const PROJECT_DIR: &str = "data/project";
pub const THEMES_DIR: &str = "data/themes/images";
pub const SETTINGS_FILE: &str = "data/settings.json";

// State of the "create project" window.
struct CreateProjectDialog {
    name: String,
    color: String,
    background: Option<String>,
}

// State of the "project theme" window.
struct ProjectThemeDialog {
    color: String,
    background: Option<String>,
}

struct Celebration {
    fireworks: Fireworks,
    description: String,
}

struct PendingDelete {
    id: u32,
    description: String,
    is_project: bool,
}

enum RowAction {
    Complete(u32),
    UncheckRefused,
    Delete(u32, String),
}

// The main application structure.
pub struct TodoApp {
    todo_list: TodoList,
    project: Option<ProjectList>,
    projects: Vec<String>,
    settings: Settings,
    main_tab: MainTab,
    todo_filter: ListFilter,
    project_filter: ListFilter,
    todo_input: String,
    project_input: String,
    pending_delete: Option<PendingDelete>,
    celebration: Option<Celebration>,
    create_dialog: Option<CreateProjectDialog>,
    theme_dialog: Option<ProjectThemeDialog>,
    show_settings: bool,
    show_about_window: bool,
    info_message: Option<String>,
    error_message: Option<String>,
    background: Option<(String, Option<TextureHandle>)>,
}

impl TodoApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = utils::load_settings(Path::new(SETTINGS_FILE)).unwrap_or_else(|e| {
            log::warn!("could not load settings: {e}");
            Settings::default()
        });
        apply_theme(&cc.egui_ctx, settings.dark_theme);

        let projects = utils::list_projects(Path::new(PROJECT_DIR));
        // Surface the most recently touched project right away.
        let project = projects
            .first()
            .map(|name| ProjectList::load(Path::new(PROJECT_DIR), name));

        Self {
            todo_list: TodoList::load(TODO_FILE),
            project,
            projects,
            settings,
            main_tab: MainTab::Todos,
            todo_filter: ListFilter::All,
            project_filter: ListFilter::All,
            todo_input: String::new(),
            project_input: String::new(),
            pending_delete: None,
            celebration: None,
            create_dialog: None,
            theme_dialog: None,
            show_settings: false,
            show_about_window: false,
            info_message: None,
            error_message: None,
            background: None,
        }
    }

    fn load_project(&mut self, name: &str) {
        let project = ProjectList::load(Path::new(PROJECT_DIR), name);
        log::info!("loaded project {} ({})", project.name(), project.color());
        self.project = Some(project);
        self.background = None;
    }

    fn add_todo(&mut self, is_project: bool) {
        let input = if is_project {
            std::mem::take(&mut self.project_input)
        } else {
            std::mem::take(&mut self.todo_input)
        };
        let description = input.trim().to_owned();

        let result = if is_project {
            match self.project.as_mut() {
                Some(project) => project.todos().add(&description),
                None => {
                    self.info_message = Some("Select a project before adding a todo.".to_owned());
                    return;
                }
            }
        } else {
            self.todo_list.add(&description)
        };

        match result {
            Ok(()) => self.info_message = Some(format!("Added: {description}")),
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    fn complete_todo(&mut self, id: u32, is_project: bool) {
        let list = if is_project {
            match self.project.as_mut() {
                Some(project) => project.todos(),
                None => return,
            }
        } else {
            &mut self.todo_list
        };

        let description = list.find(id).map(|t| t.description.clone()).unwrap_or_default();
        match list.complete(id) {
            Ok(()) => {
                self.celebration = Some(Celebration {
                    fireworks: Fireworks::new(360.0, 220.0),
                    description,
                });
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    fn delete_todo(&mut self, id: u32, is_project: bool) {
        let list = if is_project {
            match self.project.as_mut() {
                Some(project) => project.todos(),
                None => return,
            }
        } else {
            &mut self.todo_list
        };

        let description = list.find(id).map(|t| t.description.clone()).unwrap_or_default();
        match list.delete(id) {
            Ok(()) => self.info_message = Some(format!("Deleted: {description}")),
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    // The main UI is disabled while any dialog is up, so one shows at a time.
    fn dialog_open(&self) -> bool {
        self.pending_delete.is_some()
            || self.celebration.is_some()
            || self.create_dialog.is_some()
            || self.theme_dialog.is_some()
            || self.show_settings
            || self.show_about_window
            || self.info_message.is_some()
            || self.error_message.is_some()
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.error_message.clone() {
            egui::Window::new("Error").collapsible(false).resizable(false).show(ctx, |ui| {
                ui.label(RichText::new(message).color(Color32::from_rgb(210, 90, 90)));
                if ui.button("OK").clicked() {
                    self.error_message = None;
                }
            });
            return;
        }

        if let Some(message) = self.info_message.clone() {
            egui::Window::new("Notice").collapsible(false).resizable(false).show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    self.info_message = None;
                }
            });
            return;
        }

        if let Some(pending) = &self.pending_delete {
            let (id, description, is_project) =
                (pending.id, pending.description.clone(), pending.is_project);
            egui::Window::new("Confirm deletion").collapsible(false).resizable(false).show(ctx, |ui| {
                ui.label(format!("Are you sure you want to delete:\n'{description}'?"));
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        self.pending_delete = None;
                        self.delete_todo(id, is_project);
                    }
                    if ui.button("Cancel").clicked() {
                        self.pending_delete = None;
                    }
                });
            });
        }

        if let Some(celebration) = &mut self.celebration {
            celebration.fireworks.update();
            let finished = celebration.fireworks.finished();
            let mut close = finished;
            egui::Window::new("Well done!").collapsible(false).resizable(false).show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(egui::vec2(360.0, 220.0), egui::Sense::hover());
                celebration.fireworks.paint(&painter, response.rect);
                ui.label(RichText::new(format!("Completed: {}", celebration.description)).strong());
                if ui.button("Close").clicked() {
                    close = true;
                }
            });
            ctx.request_repaint_after(Duration::from_millis(25));
            if close {
                self.celebration = None;
            }
        }

        if self.show_settings {
            let dark = self.settings.dark_theme;
            egui::Window::new("Settings").collapsible(false).resizable(false).show(ctx, |ui| {
                ui.label("Choose a light or dark interface");
                ui.separator();
                ui.label(if dark { "Current theme: dark" } else { "Current theme: light" });
                if ui.button(if dark { "Switch to light" } else { "Switch to dark" }).clicked() {
                    self.settings.dark_theme = !dark;
                    apply_theme(ctx, self.settings.dark_theme);
                    if let Err(e) = utils::save_settings(&self.settings, Path::new(SETTINGS_FILE)) {
                        log::warn!("could not save settings: {e}");
                    }
                }
                ui.add_space(5.0);
                if ui.button("Close").clicked() {
                    self.show_settings = false;
                }
            });
        }

        if self.show_about_window {
            egui::Window::new("About").collapsible(false).resizable(false).show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("Todo List");
                    ui.label(format!("Version: {APP_VERSION}"));
                    ui.label("A desktop checklist with projects and fireworks.");
                    if ui.button("Close").clicked() {
                        self.show_about_window = false;
                    }
                });
            });
        }

        self.show_create_project_dialog(ctx);
        self.show_theme_dialog(ctx);
    }

    fn show_create_project_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &mut self.create_dialog else {
            return;
        };

        let mut close = false;
        let mut create: Option<(String, String, Option<String>)> = None;
        let mut error = None;

        egui::Window::new("Create project").collapsible(false).resizable(false).show(ctx, |ui| {
            egui::Grid::new("create_project_grid").num_columns(2).spacing([10.0, 10.0]).show(ui, |ui| {
                ui.label("Name:");
                ui.text_edit_singleline(&mut dialog.name);
                ui.end_row();

                ui.label("Color:");
                egui::ComboBox::from_id_salt("create_project_color")
                    .selected_text(dialog.color.clone())
                    .show_ui(ui, |ui| {
                        for color in PROJECT_COLORS {
                            ui.selectable_value(&mut dialog.color, color.to_owned(), color);
                        }
                    });
                ui.end_row();

                ui.label("Background:");
                ui.horizontal(|ui| {
                    if ui.button("Choose image...").clicked() {
                        match pick_background_image() {
                            Ok(picked) => {
                                if picked.is_some() {
                                    dialog.background = picked;
                                }
                            }
                            Err(e) => error = Some(e),
                        }
                    }
                    if ui.button("Clear").clicked() {
                        dialog.background = None;
                    }
                });
                ui.end_row();
            });

            match &dialog.background {
                Some(path) => ui.label(format!("Selected: {path}")),
                None => ui.label(RichText::new("No background image").italics()),
            };

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("Create").clicked() {
                    create = Some((dialog.name.clone(), dialog.color.clone(), dialog.background.clone()));
                }
                if ui.button("Cancel").clicked() {
                    close = true;
                }
            });
        });

        if let Some(e) = error {
            self.error_message = Some(e);
        }
        if let Some((name, color, background)) = create {
            match ProjectList::create(Path::new(PROJECT_DIR), &name, &color, background.as_deref()) {
                Ok(project) => {
                    self.projects = utils::list_projects(Path::new(PROJECT_DIR));
                    self.info_message = Some(format!("Created project: {}", project.name()));
                    self.project = Some(project);
                    self.background = None;
                    close = true;
                }
                Err(e) => self.error_message = Some(e.to_string()),
            }
        }
        if close {
            self.create_dialog = None;
        }
    }

    fn show_theme_dialog(&mut self, ctx: &egui::Context) {
        if self.theme_dialog.is_some() && self.project.is_none() {
            self.theme_dialog = None;
        }
        let (Some(dialog), Some(project)) = (&mut self.theme_dialog, &mut self.project) else {
            return;
        };

        let mut close = false;
        let mut apply = false;
        let mut error = None;

        egui::Window::new(format!("Theme: {}", project.name()))
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("theme_grid").num_columns(2).spacing([10.0, 10.0]).show(ui, |ui| {
                    ui.label("Color:");
                    egui::ComboBox::from_id_salt("theme_color")
                        .selected_text(dialog.color.clone())
                        .show_ui(ui, |ui| {
                            for color in PROJECT_COLORS {
                                ui.selectable_value(&mut dialog.color, color.to_owned(), color);
                            }
                        });
                    ui.end_row();

                    ui.label("Background:");
                    ui.horizontal(|ui| {
                        if ui.button("Choose image...").clicked() {
                            match pick_background_image() {
                                Ok(picked) => {
                                    if picked.is_some() {
                                        dialog.background = picked;
                                    }
                                }
                                Err(e) => error = Some(e),
                            }
                        }
                        if ui.button("Clear").clicked() {
                            dialog.background = None;
                        }
                    });
                    ui.end_row();
                });

                match &dialog.background {
                    Some(path) => ui.label(format!("Background: {path}")),
                    None => ui.label(RichText::new("No background image").italics()),
                };

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Apply").clicked() {
                        apply = true;
                    }
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                });
            });

        if apply {
            let result = project
                .set_color(&dialog.color)
                .and_then(|_| project.set_background_image(dialog.background.as_deref()));
            match result {
                Ok(()) => {
                    self.background = None;
                    self.info_message = Some(format!("Updated theme for {}", project.name()));
                    close = true;
                }
                Err(e) => self.error_message = Some(e.to_string()),
            }
        }
        if let Some(e) = error {
            self.error_message = Some(e);
        }
        if close {
            self.theme_dialog = None;
        }
    }

    fn todo_section(&mut self, ui: &mut egui::Ui, is_project: bool) {
        // Input row
        let mut submit = false;
        ui.horizontal(|ui| {
            let input = if is_project { &mut self.project_input } else { &mut self.todo_input };
            let hint = if is_project { "New task for this project..." } else { "New task..." };
            let response = ui.add_sized(
                [ui.available_width() - 80.0, 20.0],
                egui::TextEdit::singleline(input).hint_text(hint),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }
            if ui.button("Add").clicked() {
                submit = true;
            }
        });
        if submit {
            self.add_todo(is_project);
        }

        ui.add_space(5.0);

        // All / Active / Completed sub-views
        let filter = if is_project { &mut self.project_filter } else { &mut self.todo_filter };
        ui.horizontal(|ui| {
            for option in [ListFilter::All, ListFilter::Active, ListFilter::Completed] {
                ui.selectable_value(filter, option, option.label());
            }
        });
        ui.separator();

        let filter = *filter;
        let todos: Vec<Todo> = if is_project {
            match &self.project {
                Some(project) => project.list().filtered(filter),
                None => Vec::new(),
            }
        } else {
            self.todo_list.filtered(filter)
        };

        let mut action = None;
        let id_salt = if is_project { "project_rows" } else { "todo_rows" };
        egui::ScrollArea::vertical().id_salt(id_salt).auto_shrink([false; 2]).show(ui, |ui| {
            if todos.is_empty() {
                ui.label(RichText::new("Nothing here yet.").weak());
            }
            // Newest first
            for todo in todos.iter().rev() {
                if let Some(row_action) = todo_row(ui, todo) {
                    action = Some(row_action);
                }
                ui.separator();
            }
        });

        match action {
            Some(RowAction::Complete(id)) => self.complete_todo(id, is_project),
            Some(RowAction::UncheckRefused) => {
                self.info_message = Some("A completed todo cannot be unchecked.".to_owned());
            }
            Some(RowAction::Delete(id, description)) => {
                self.pending_delete = Some(PendingDelete { id, description, is_project });
            }
            None => {}
        }
    }

    fn projects_tab(&mut self, ui: &mut egui::Ui) {
        self.paint_project_background(ui);

        match &self.project {
            Some(project) => {
                let mut summary = format!("{} • {}", project.name(), project.color());
                if project.background_image().is_some() {
                    summary.push_str(" • background image");
                }
                ui.label(
                    RichText::new(summary)
                        .italics()
                        .strong()
                        .color(project_color(&project.color())),
                );
            }
            None => {
                ui.label(RichText::new("No project selected").italics());
            }
        }
        ui.separator();

        // Selector row
        let mut selected = self.project.as_ref().map(|p| p.name().to_owned());
        let before = selected.clone();
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("project_select")
                .selected_text(selected.clone().unwrap_or_else(|| "No projects yet".to_owned()))
                .show_ui(ui, |ui| {
                    for name in &self.projects {
                        ui.selectable_value(&mut selected, Some(name.clone()), name);
                    }
                });
            if ui.button("New project").clicked() {
                self.create_dialog = Some(CreateProjectDialog {
                    name: String::new(),
                    color: "blue".to_owned(),
                    background: None,
                });
            }
            if ui.button("Theme").clicked() {
                match &self.project {
                    Some(project) => {
                        self.theme_dialog = Some(ProjectThemeDialog {
                            color: project.color(),
                            background: project.background_image(),
                        });
                    }
                    None => {
                        self.info_message =
                            Some("Select a project before changing its theme.".to_owned());
                    }
                }
            }
        });
        if selected != before {
            if let Some(name) = &selected {
                self.load_project(name);
            }
        }

        ui.add_space(5.0);
        self.todo_section(ui, true);
    }

    // Paints the project's background image, dimmed, behind the tab content.
    fn paint_project_background(&mut self, ui: &mut egui::Ui) {
        let Some(path) = self.project.as_ref().and_then(|p| p.background_image()) else {
            return;
        };

        let stale = !matches!(&self.background, Some((cached, _)) if *cached == path);
        if stale {
            self.background = Some((path.clone(), load_background_texture(ui.ctx(), &path)));
        }

        if let Some((_, Some(texture))) = &self.background {
            let rect = ui.available_rect_before_wrap();
            ui.painter().image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::from_white_alpha(40),
            );
        }
    }
}

impl eframe::App for TodoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_dialogs(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Todo List");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⚙ Settings").clicked() {
                        self.show_settings = true;
                    }
                    if ui.button("About").clicked() {
                        self.show_about_window = true;
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let active = self.todo_list.filtered(ListFilter::Active).len();
            let total = self.todo_list.todos().len();
            ui.label(format!("{active} open of {total} todos"));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            // When a dialog is shown, disable the main UI
            ui.add_enabled_ui(!self.dialog_open(), |ui| {
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.main_tab, MainTab::Todos, "Todos");
                    ui.selectable_value(&mut self.main_tab, MainTab::Projects, "Projects");
                });
                ui.separator();

                match self.main_tab {
                    MainTab::Todos => self.todo_section(ui, false),
                    MainTab::Projects => self.projects_tab(ui),
                }
            });
        });
    }
}

fn todo_row(ui: &mut egui::Ui, todo: &Todo) -> Option<RowAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        ui.label(RichText::new(todo.created_at.format("%d/%m %H:%M").to_string()).weak().small());

        let mut checked = todo.completed;
        if ui.checkbox(&mut checked, "").changed() {
            action = Some(if checked {
                RowAction::Complete(todo.id)
            } else {
                RowAction::UncheckRefused
            });
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("✖").clicked() {
                action = Some(RowAction::Delete(todo.id, todo.description.clone()));
            }
            let text = if todo.completed {
                RichText::new(&todo.description).strikethrough().weak()
            } else {
                RichText::new(&todo.description).strong()
            };
            ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                ui.add(egui::Label::new(text).wrap());
            });
        });
    });
    action
}

// Opens the native file dialog and copies the chosen image into the themes
// directory. Returns Ok(None) when the user cancels.
fn pick_background_image() -> Result<Option<String>, String> {
    let picked = rfd::FileDialog::new()
        .add_filter("Images", &utils::SUPPORTED_IMAGE_EXTENSIONS)
        .pick_file();
    let Some(source) = picked else {
        return Ok(None);
    };

    utils::import_background_image(&source, Path::new(THEMES_DIR))
        .map(|dest| Some(dest.to_string_lossy().into_owned()))
        .map_err(|e| e.to_string())
}

fn load_background_texture(ctx: &egui::Context, path: &str) -> Option<TextureHandle> {
    match image::open(path) {
        Ok(decoded) => {
            let rgba = decoded.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &rgba);
            Some(ctx.load_texture("project_background", color_image, egui::TextureOptions::LINEAR))
        }
        Err(e) => {
            log::warn!("could not load background image {path}: {e}");
            None
        }
    }
}

fn project_color(name: &str) -> Color32 {
    match name {
        "red" => Color32::from_rgb(211, 47, 47),
        "green" => Color32::from_rgb(76, 175, 80),
        "yellow" => Color32::from_rgb(251, 192, 45),
        "orange" => Color32::from_rgb(255, 87, 34),
        "purple" => Color32::from_rgb(156, 39, 176),
        "brown" => Color32::from_rgb(121, 85, 72),
        "black" => Color32::from_rgb(66, 66, 66),
        _ => Color32::from_rgb(74, 144, 226), // default blue
    }
}

fn apply_theme(ctx: &egui::Context, dark: bool) {
    ctx.set_theme(if dark { egui::Theme::Dark } else { egui::Theme::Light });
}
