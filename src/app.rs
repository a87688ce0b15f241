//! Iced front end for the task store

use crate::config::Config;
use crate::store::{StoreEvent, TaskStore};
use crate::task::{Filter, Task, TaskId};
use chrono::Local;
use iced::futures::channel::mpsc;
use iced::futures::{FutureExt, StreamExt};
use iced::widget::{Column, Row, button, column, row, scrollable, text, text_input};
use iced::{Element, Length, Task as Command};
use iced_local_storage::{MemoryStorage, Storage};

/// Application state
pub struct App {
    store: TaskStore<Box<dyn Storage>>,
    events: mpsc::UnboundedReceiver<StoreEvent>,
    filter: Filter,
    new_task: String,
    notice: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    NewTaskChanged(String),
    AddTask,
    ToggleTask(TaskId),
    DeleteTask(TaskId),
    FilterSelected(Filter),
}

impl App {
    /// Open storage and load persisted tasks before the first view
    ///
    /// Falls back to in-memory storage when the storage file cannot be read.
    pub fn new(config: Config) -> (App, Command<Message>) {
        let storage: Box<dyn Storage> = match config.open_storage() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                tracing::error!(error = %e, "falling back to in-memory storage");
                Box::new(MemoryStorage::new())
            }
        };

        (App::with_storage(storage, &config.storage_key), Command::none())
    }

    pub fn with_storage(storage: Box<dyn Storage>, key: &str) -> App {
        let mut store = TaskStore::open_with_key(storage, key);
        let events = store.subscribe();
        tracing::info!(tasks = store.len(), "to-do list ready");

        App {
            store,
            events,
            filter: Filter::All,
            new_task: String::new(),
            notice: None,
        }
    }

    pub fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::NewTaskChanged(value) => {
                self.new_task = value;
                self.notice = None;
            }

            Message::AddTask => match self.store.add(&self.new_task) {
                Ok(_) => {
                    self.new_task.clear();
                    self.notice = None;
                }
                Err(e) => {
                    self.notice = Some(e.to_string());
                }
            },

            Message::ToggleTask(id) => {
                self.store.toggle(id);
            }

            Message::DeleteTask(id) => {
                // Only completed tasks offer a delete button.
                if self.store.get(id).is_some_and(|task| task.completed) {
                    self.store.delete(id);
                }
            }

            Message::FilterSelected(filter) => {
                self.filter = filter;
            }
        }

        self.drain_events();
        Command::none()
    }

    fn drain_events(&mut self) {
        while let Some(Some(event)) = self.events.next().now_or_never() {
            if let StoreEvent::PersistFailed { message } = event {
                self.notice = Some(format!("Could not save tasks: {}", message));
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let title = text("To-Do List").size(28);

        let input = row![
            text_input("Add a new Task", &self.new_task)
                .on_input(Message::NewTaskChanged)
                .on_submit(Message::AddTask)
                .width(Length::Fill),
            button("Add").on_press(Message::AddTask),
        ]
        .spacing(10);

        let filters = Row::with_children(Filter::ALL.into_iter().map(|filter| {
            let style = if filter == self.filter {
                button::primary
            } else {
                button::secondary
            };

            let toggle: Element<'_, Message> = button(text(filter.label()).size(14))
                .style(style)
                .on_press(Message::FilterSelected(filter))
                .into();
            toggle
        }))
        .spacing(8);

        let visible = self.store.filtered_view(self.filter);
        let tasks: Element<'_, Message> = if visible.is_empty() {
            text("No tasks found.").size(14).into()
        } else {
            Column::with_children(visible.into_iter().map(task_row))
                .spacing(12)
                .into()
        };

        let mut content = column![title, input, filters].spacing(16).padding(20);

        if let Some(notice) = &self.notice {
            content = content.push(text(notice.as_str()).size(14));
        }

        content = content.push(scrollable(tasks).height(Length::Fill));

        content.width(Length::Fill).into()
    }

    /// The state backing the view
    pub fn store(&self) -> &TaskStore<Box<dyn Storage>> {
        &self.store
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }
}

fn task_row(task: &Task) -> Element<'_, Message> {
    let label = if task.completed {
        format!("✓ {}", task.title)
    } else {
        task.title.clone()
    };

    let created = task
        .created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S");

    let details = column![
        text(label),
        text(format!("Created on: {}", created)).size(12),
    ]
    .spacing(2)
    .width(Length::Fill);

    let mut actions = row![
        button(if task.completed { "Undo" } else { "Complete" })
            .style(if task.completed {
                button::secondary
            } else {
                button::success
            })
            .on_press(Message::ToggleTask(task.id)),
    ]
    .spacing(8);

    if task.completed {
        actions = actions.push(
            button("Delete")
                .style(button::danger)
                .on_press(Message::DeleteTask(task.id)),
        );
    }

    row![details, actions].spacing(10).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::with_storage(Box::new(MemoryStorage::new()), "tasks")
    }

    fn type_and_add(app: &mut App, title: &str) {
        let _ = app.update(Message::NewTaskChanged(title.to_string()));
        let _ = app.update(Message::AddTask);
    }

    #[test]
    fn adding_clears_the_input() {
        let mut app = app();
        type_and_add(&mut app, "Buy milk");

        assert_eq!(app.store().len(), 1);
        assert!(app.new_task.is_empty());
        assert_eq!(app.notice(), None);
    }

    #[test]
    fn blank_title_shows_notice_until_input_changes() {
        let mut app = app();
        type_and_add(&mut app, "   ");

        assert!(app.store().is_empty());
        assert_eq!(app.notice(), Some("Please, provide a task name"));
        assert_eq!(app.new_task, "   ");

        let _ = app.update(Message::NewTaskChanged("B".to_string()));
        assert_eq!(app.notice(), None);
    }

    #[test]
    fn delete_is_only_honoured_for_completed_tasks() {
        let mut app = app();
        type_and_add(&mut app, "a");
        let id = app.store().tasks()[0].id;

        let _ = app.update(Message::DeleteTask(id));
        assert_eq!(app.store().len(), 1);

        let _ = app.update(Message::ToggleTask(id));
        let _ = app.update(Message::DeleteTask(id));
        assert!(app.store().is_empty());
    }

    #[test]
    fn filter_selection_is_not_persisted() {
        let mut app = app();
        type_and_add(&mut app, "a");
        let _ = app.update(Message::FilterSelected(Filter::Completed));

        assert_eq!(app.filter(), Filter::Completed);
        assert!(app.store().filtered_view(app.filter()).is_empty());
        assert_eq!(app.store().storage().keys(), vec!["tasks"]);
    }
}
