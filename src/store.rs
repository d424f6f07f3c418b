use crate::models::{ListFilter, Todo};
use chrono::{DateTime, Local, SecondsFormat};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// A todo collection backed by a plain text file, one entry per line:
/// `id|description|completed|rfc3339-timestamp`. Lines starting with `#` are
/// preserved verbatim so project files can keep their metadata header.
pub struct TodoList {
    todos: Vec<Todo>,
    path: PathBuf,
    next_id: u32,
    preamble: Vec<String>,
}

impl TodoList {
    /// Loads a list from `path`. A missing file is fine for a fresh list;
    /// malformed lines are skipped rather than failing the whole load.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut list = TodoList {
            todos: Vec::new(),
            path,
            next_id: 1,
            preamble: Vec::new(),
        };

        let content = match fs::read_to_string(&list.path) {
            Ok(content) => content,
            Err(_) => return list, // nothing saved yet
        };

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(stripped) = line.strip_prefix('#') {
                list.preamble.push(format!("#{stripped}"));
                continue;
            }
            if let Some(todo) = parse_line(line) {
                if todo.id >= list.next_id {
                    list.next_id = todo.id + 1;
                }
                list.todos.push(todo);
            } else {
                log::warn!("skipping malformed todo line in {}: {line}", list.path.display());
            }
        }

        list
    }

    /// Rewrites the backing file with the preamble followed by all todos.
    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut content = String::new();
        for line in &self.preamble {
            content.push_str(line);
            content.push('\n');
        }
        if !self.preamble.is_empty() {
            content.push('\n');
        }
        for todo in &self.todos {
            content.push_str(&format_line(todo));
            content.push('\n');
        }

        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Appends a new entry and persists the list.
    pub fn add(&mut self, description: &str) -> Result<(), Box<dyn Error>> {
        let description = description.trim();
        if description.is_empty() {
            return Err("the description must not be empty".into());
        }

        self.todos.push(Todo {
            id: self.next_id,
            description: description.to_owned(),
            completed: false,
            created_at: Local::now(),
        });
        self.next_id += 1;
        self.save()
    }

    /// Marks the entry with `id` as completed and persists the list.
    pub fn complete(&mut self, id: u32) -> Result<(), Box<dyn Error>> {
        match self.todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => todo.completed = true,
            None => return Err(format!("no todo with id {id}").into()),
        }
        self.save()
    }

    /// Removes the entry with `id` and persists the list.
    pub fn delete(&mut self, id: u32) -> Result<(), Box<dyn Error>> {
        match self.todos.iter().position(|t| t.id == id) {
            Some(index) => {
                self.todos.remove(index);
                self.save()
            }
            None => Err(format!("no todo with id {id}").into()),
        }
    }

    pub fn find(&self, id: u32) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn filtered(&self, filter: ListFilter) -> Vec<Todo> {
        self.todos
            .iter()
            .filter(|t| match filter {
                ListFilter::All => true,
                ListFilter::Active => !t.completed,
                ListFilter::Completed => t.completed,
            })
            .cloned()
            .collect()
    }

    fn preamble_line(&self, key: &str) -> Option<String> {
        self.preamble
            .iter()
            .find_map(|l| l.strip_prefix(key).map(|v| v.trim().to_owned()))
    }

    // Replaces the value of `key`, or inserts a new line after `insert_after`
    // (falling back to the end of the preamble).
    fn set_preamble_line(&mut self, key: &str, value: Option<&str>, insert_after: &str) {
        if let Some(index) = self.preamble.iter().position(|l| l.starts_with(key)) {
            match value {
                Some(value) => self.preamble[index] = format!("{key}{value}"),
                None => {
                    self.preamble.remove(index);
                }
            }
            return;
        }
        if let Some(value) = value {
            let at = self
                .preamble
                .iter()
                .position(|l| l.starts_with(insert_after))
                .map(|i| i + 1)
                .unwrap_or(self.preamble.len());
            self.preamble.insert(at, format!("{key}{value}"));
        }
    }
}

fn parse_line(line: &str) -> Option<Todo> {
    let mut parts = line.splitn(4, '|');
    let id = parts.next()?.parse::<u32>().ok()?;
    let description = parts.next()?.to_owned();
    let completed = parts.next()? == "true";
    let created_at = DateTime::parse_from_rfc3339(parts.next()?)
        .map(|dt| dt.with_timezone(&Local))
        .unwrap_or_else(|_| Local::now());

    Some(Todo {
        id,
        description,
        completed,
        created_at,
    })
}

fn format_line(todo: &Todo) -> String {
    format!(
        "{}|{}|{}|{}",
        todo.id,
        todo.description,
        todo.completed,
        todo.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

const PROJECT_KEY: &str = "# Project: ";
const COLOR_KEY: &str = "# Color: ";
const CREATED_KEY: &str = "# Created: ";
const BACKGROUND_KEY: &str = "# BackgroundImage: ";

/// A project is a todo list whose file carries a metadata header with the
/// project name, its color and an optional background image.
pub struct ProjectList {
    list: TodoList,
    name: String,
}

impl ProjectList {
    /// Creates a new project file with its metadata header, then loads it.
    pub fn create(
        dir: &Path,
        name: &str,
        color: &str,
        background_image: Option<&str>,
    ) -> Result<Self, Box<dyn Error>> {
        let name = name.trim();
        if name.is_empty() {
            return Err("the project name must not be empty".into());
        }

        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{name}.txt"));

        let mut content = format!(
            "{PROJECT_KEY}{name}\n{COLOR_KEY}{color}\n{CREATED_KEY}{}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        if let Some(image) = background_image {
            content.push_str(&format!("{BACKGROUND_KEY}{image}\n"));
        }
        content.push('\n');

        fs::write(&path, content)?;
        Ok(Self::load(dir, name))
    }

    /// Loads the project `name` from `dir`, adding the metadata header to
    /// legacy files that predate it.
    pub fn load(dir: &Path, name: &str) -> Self {
        let path = dir.join(format!("{name}.txt"));
        let mut list = TodoList::load(path);

        // Migrate headerless files from early versions.
        if list.preamble_line(PROJECT_KEY).is_none() {
            list.preamble.insert(0, format!("{PROJECT_KEY}{name}"));
            list.set_preamble_line(COLOR_KEY, Some("blue"), PROJECT_KEY);
            list.set_preamble_line(
                CREATED_KEY,
                Some(&Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
                COLOR_KEY,
            );
            if let Err(e) = list.save() {
                log::warn!("could not migrate project file {}: {e}", list.path.display());
            }
        }

        ProjectList {
            list,
            name: name.to_owned(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> String {
        self.list
            .preamble_line(COLOR_KEY)
            .unwrap_or_else(|| "blue".to_owned())
    }

    pub fn background_image(&self) -> Option<String> {
        self.list.preamble_line(BACKGROUND_KEY).filter(|v| !v.is_empty())
    }

    pub fn set_color(&mut self, color: &str) -> Result<(), Box<dyn Error>> {
        self.list.set_preamble_line(COLOR_KEY, Some(color), PROJECT_KEY);
        self.list.save()
    }

    pub fn set_background_image(&mut self, image: Option<&str>) -> Result<(), Box<dyn Error>> {
        self.list.set_preamble_line(BACKGROUND_KEY, image, CREATED_KEY);
        self.list.save()
    }

    pub fn todos(&mut self) -> &mut TodoList {
        &mut self.list
    }

    pub fn list(&self) -> &TodoList {
        &self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_path(name: &str) -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!("todoapp-store-{}-{n}-{name}", std::process::id()))
    }

    #[test]
    fn add_persists_and_reloads() {
        let path = temp_path("roundtrip.txt");
        let mut list = TodoList::load(&path);
        list.add("buy milk").unwrap();
        list.add("water the plants").unwrap();

        let reloaded = TodoList::load(&path);
        assert_eq!(reloaded.todos().len(), 2);
        assert_eq!(reloaded.todos()[0].description, "buy milk");
        assert_eq!(reloaded.todos()[0].id, 1);
        assert_eq!(reloaded.todos()[1].id, 2);
        assert!(!reloaded.todos()[0].completed);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn blank_description_is_rejected() {
        let path = temp_path("blank.txt");
        let mut list = TodoList::load(&path);
        assert!(list.add("   ").is_err());
        assert!(list.todos().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn complete_and_delete_by_id() {
        let path = temp_path("mutate.txt");
        let mut list = TodoList::load(&path);
        list.add("first").unwrap();
        list.add("second").unwrap();

        list.complete(1).unwrap();
        assert!(list.find(1).unwrap().completed);
        assert_eq!(list.filtered(ListFilter::Active).len(), 1);
        assert_eq!(list.filtered(ListFilter::Completed).len(), 1);

        list.delete(2).unwrap();
        assert_eq!(list.todos().len(), 1);
        assert!(list.complete(99).is_err());
        assert!(list.delete(99).is_err());

        fs::remove_file(&path).ok();
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let path = temp_path("malformed.txt");
        fs::write(
            &path,
            "7|valid entry|false|2024-03-01T10:00:00+00:00\n\
             not a todo\n\
             x|bad id|false|2024-03-01T10:00:00+00:00\n\
             8|too few fields\n",
        )
        .unwrap();

        let list = TodoList::load(&path);
        assert_eq!(list.todos().len(), 1);
        assert_eq!(list.todos()[0].id, 7);
        assert_eq!(list.next_id, 8);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn unparsable_timestamp_falls_back_to_now() {
        let path = temp_path("badtime.txt");
        fs::write(&path, "1|entry|true|yesterday\n").unwrap();

        let list = TodoList::load(&path);
        assert_eq!(list.todos().len(), 1);
        assert!(list.todos()[0].completed);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn project_header_roundtrip() {
        let dir = temp_path("projects");
        let mut project = ProjectList::create(&dir, "garden", "green", None).unwrap();
        assert_eq!(project.color(), "green");
        assert_eq!(project.background_image(), None);

        project.todos().add("prune the roses").unwrap();
        project.set_color("purple").unwrap();
        project.set_background_image(Some("data/themes/images/ivy.png")).unwrap();

        let reloaded = ProjectList::load(&dir, "garden");
        assert_eq!(reloaded.color(), "purple");
        assert_eq!(
            reloaded.background_image().as_deref(),
            Some("data/themes/images/ivy.png")
        );
        assert_eq!(reloaded.list().todos().len(), 1);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn clearing_background_removes_the_header_line() {
        let dir = temp_path("projects-clear");
        let mut project =
            ProjectList::create(&dir, "attic", "brown", Some("data/themes/images/dust.png")).unwrap();
        assert!(project.background_image().is_some());

        project.set_background_image(None).unwrap();
        let reloaded = ProjectList::load(&dir, "attic");
        assert_eq!(reloaded.background_image(), None);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn legacy_project_file_gains_a_header() {
        let dir = temp_path("projects-legacy");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("old.txt"),
            "1|carried over|false|2023-01-01T00:00:00+00:00\n",
        )
        .unwrap();

        let project = ProjectList::load(&dir, "old");
        assert_eq!(project.color(), "blue");
        assert_eq!(project.list().todos().len(), 1);

        let content = fs::read_to_string(dir.join("old.txt")).unwrap();
        assert!(content.starts_with("# Project: old"));
        assert!(content.contains("# Color: blue"));

        fs::remove_dir_all(&dir).ok();
    }
}
