use chrono::Local;
use sauron::{
    html::{attributes::*, *},
    prelude::*,
};
use shared::{display_date, DialogMode, EditDialog, SearchQuery, SortOrder, Submission, Todo, TodoCache};
use uuid::Uuid;
use web_sys::{console, window};

mod api;

const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this task?";

#[derive(Debug, Clone, Copy, PartialEq)]
enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
struct Notice {
    level: NoticeLevel,
    message: String,
}

#[derive(Debug, Clone)]
pub enum Msg {
    LoadTodos,
    TodosLoaded(SortOrder, Vec<Todo>),
    ToggleSort,
    SetSearch(String),

    OpenCreate,
    OpenEdit(Uuid),
    SetDraftText(String),
    SetDraftDescription(String),
    CancelDialog,
    SubmitDialog,
    TodoCreated(Todo),
    TodoSaved(Todo),

    ToggleCompleted(Uuid),
    TodoToggled(Todo),
    DeleteTodo(Uuid),
    TodoDeleted(Uuid),

    DismissNotice,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct Model {
    todos: TodoCache,
    search: String,
    dialog: EditDialog,
    loading: bool,
    notice: Option<Notice>,
}

impl Model {
    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            message: message.into(),
        });
    }
}

impl Application for Model {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        Cmd::new(async { Msg::LoadTodos })
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::LoadTodos => {
                self.loading = true;
                let sort = self.todos.sort();
                Cmd::new(async move {
                    match api::fetch_todos(sort).await {
                        Ok(todos) => Msg::TodosLoaded(sort, todos),
                        Err(e) => Msg::Failed(e),
                    }
                })
            }
            Msg::TodosLoaded(sort, todos) => {
                if !self.todos.load(sort, todos) {
                    console::log_1(&format!("[DEBUG] dropping stale {} load", sort).into());
                    return Cmd::none();
                }
                console::log_1(&format!("[DEBUG] loaded {} todos ({})", self.todos.len(), sort).into());
                self.loading = false;
                Cmd::none()
            }
            Msg::ToggleSort => {
                self.todos.toggle_sort();
                Cmd::new(async { Msg::LoadTodos })
            }
            Msg::SetSearch(search) => {
                self.search = search;
                Cmd::none()
            }
            Msg::OpenCreate => {
                self.dialog.open_create();
                Cmd::none()
            }
            Msg::OpenEdit(id) => {
                if let Some(todo) = self.todos.get(id) {
                    self.dialog.open_edit(todo);
                }
                Cmd::none()
            }
            Msg::SetDraftText(text) => {
                self.dialog.set_text(text);
                Cmd::none()
            }
            Msg::SetDraftDescription(description) => {
                self.dialog.set_description(description);
                Cmd::none()
            }
            Msg::CancelDialog => {
                self.dialog.close();
                Cmd::none()
            }
            Msg::SubmitDialog => match self.dialog.submission() {
                None => Cmd::none(),
                Some(Err(err)) => {
                    self.notify(NoticeLevel::Error, err.user_message());
                    Cmd::none()
                }
                Some(Ok(Submission::Create(request))) => Cmd::new(async move {
                    match api::create_todo(&request).await {
                        Ok(todo) => Msg::TodoCreated(todo),
                        Err(e) => Msg::Failed(e),
                    }
                }),
                Some(Ok(Submission::Update { id, patch })) => Cmd::new(async move {
                    match api::update_todo(id, &patch).await {
                        Ok(todo) => Msg::TodoSaved(todo),
                        Err(e) => Msg::Failed(e),
                    }
                }),
            },
            Msg::TodoCreated(todo) => {
                self.todos.prepend(todo);
                self.dialog.close();
                self.notify(NoticeLevel::Info, "Task added");
                Cmd::none()
            }
            Msg::TodoSaved(todo) => {
                self.todos.replace(todo);
                self.dialog.close();
                self.notify(NoticeLevel::Info, "Task updated");
                Cmd::none()
            }
            Msg::ToggleCompleted(id) => {
                let Some(patch) = self.todos.completion_patch(id) else {
                    return Cmd::none();
                };
                Cmd::new(async move {
                    match api::update_todo(id, &patch).await {
                        Ok(todo) => Msg::TodoToggled(todo),
                        Err(e) => Msg::Failed(e),
                    }
                })
            }
            Msg::TodoToggled(todo) => {
                self.todos.replace(todo);
                Cmd::none()
            }
            Msg::DeleteTodo(id) => {
                let confirmed = window()
                    .and_then(|w| w.confirm_with_message(DELETE_CONFIRMATION).ok())
                    .unwrap_or(false);
                if !confirmed {
                    return Cmd::none();
                }
                Cmd::new(async move {
                    match api::delete_todo(id).await {
                        Ok(deleted) => Msg::TodoDeleted(deleted.id),
                        Err(e) => Msg::Failed(e),
                    }
                })
            }
            Msg::TodoDeleted(id) => {
                self.todos.remove(id);
                self.notify(NoticeLevel::Info, "Task deleted");
                Cmd::none()
            }
            Msg::DismissNotice => {
                self.notice = None;
                Cmd::none()
            }
            Msg::Failed(error) => {
                console::error_1(&format!("Error: {}", error).into());
                self.loading = false;
                self.notify(NoticeLevel::Error, error);
                Cmd::none()
            }
        }
    }

    fn view(&self) -> Node<Msg> {
        div(
            [class("min-h-screen bg-gradient-to-br from-gray-50 to-gray-100 p-4")],
            [
                self.view_notice(),
                div(
                    [class("max-w-5xl mx-auto bg-white p-6 rounded-2xl shadow-md")],
                    [
                        h1([class("text-3xl font-bold mb-6 text-center")], [text("Task Manager")]),
                        self.view_toolbar(),
                        if self.loading && self.todos.is_empty() {
                            div([class("text-center py-10 text-gray-500 italic")], [text("Loading...")])
                        } else {
                            self.view_table()
                        },
                        self.view_dialog(),
                    ],
                ),
            ],
        )
    }
}

impl Model {
    fn view_notice(&self) -> Node<Msg> {
        let Some(notice) = &self.notice else {
            return span([], []);
        };
        let color = match notice.level {
            NoticeLevel::Info => "bg-green-600",
            NoticeLevel::Error => "bg-red-600",
        };
        div(
            [class(&format!(
                "fixed top-4 right-4 z-50 flex items-center gap-3 text-white px-4 py-3 rounded-lg shadow-lg {}",
                color
            ))],
            [
                span([], [text(&notice.message)]),
                button(
                    [
                        r#type("button"),
                        on_click(|_| Msg::DismissNotice),
                        class("cursor-pointer font-bold"),
                    ],
                    [text("×")],
                ),
            ],
        )
    }

    fn view_toolbar(&self) -> Node<Msg> {
        div([class("flex items-center justify-between mb-4")], [
            input(
                [
                    r#type("text"),
                    placeholder("Search tasks..."),
                    value(&self.search),
                    on_input(|event| Msg::SetSearch(event.value())),
                    class("border border-gray-300 px-3 py-2 rounded-md w-1/2 outline-none"),
                ],
                [],
            ),
            button(
                [
                    r#type("button"),
                    on_click(|_| Msg::OpenCreate),
                    class("bg-green-600 text-white px-4 py-2 rounded-lg hover:bg-green-700 flex items-center cursor-pointer"),
                ],
                [text("+ Add Task")],
            ),
        ])
    }

    fn view_table(&self) -> Node<Msg> {
        let query = SearchQuery::new(&self.search);
        let visible = self.todos.visible(&query, &Local);
        let arrow = match self.todos.sort() {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        };

        div([], [
            table([class("w-full table-auto border-collapse")], [
                thead([], [tr([class("bg-gray-100 text-gray-700 text-left")], [
                    th([class("p-3")], [text("Sr No")]),
                    th([class("p-3")], [text("Title")]),
                    th([class("p-3")], [text("Description")]),
                    th(
                        [class("p-3 cursor-pointer"), on_click(|_| Msg::ToggleSort)],
                        [text(&format!("Date {}", arrow))],
                    ),
                    th([class("p-3")], [text("Status")]),
                    th([class("p-3")], [text("✏️")]),
                    th([class("p-3")], [text("❌")]),
                ])]),
                tbody(
                    [],
                    if visible.is_empty() {
                        vec![self.view_empty_row()]
                    } else {
                        visible
                            .iter()
                            .enumerate()
                            .map(|(index, todo)| self.view_row(index, todo))
                            .collect::<Vec<_>>()
                    },
                ),
            ]),
        ])
    }

    fn view_empty_row(&self) -> Node<Msg> {
        tr([], [td([attr("colspan", "7"), class("p-6 text-center text-gray-500")], [
            div([class("flex flex-col items-center justify-center gap-2")], [
                span([class("text-3xl")], [text("⊗")]),
                span([class("text-lg")], [text("No todos found")]),
            ]),
        ])])
    }

    fn view_row(&self, index: usize, todo: &Todo) -> Node<Msg> {
        let id = todo.id;
        tr([key(id.to_string()), class("border-b hover:bg-gray-50")], [
            td([class("p-3")], [text(&(index + 1).to_string())]),
            td([class("p-3")], [text(&todo.text)]),
            td([class("p-3")], [text(&todo.description)]),
            td([class("p-3")], [text(&display_date(&todo.created_at, &Local))]),
            td([class("p-3")], [label([class("flex items-center space-x-2")], [
                input(
                    [
                        r#type("checkbox"),
                        checked(todo.completed),
                        // The box only moves when a response patches the list.
                        on_click(move |event| {
                            event.prevent_default();
                            Msg::ToggleCompleted(id)
                        }),
                        class("h-4 w-4 text-green-600 rounded border-gray-300 cursor-pointer"),
                    ],
                    [],
                ),
                span([], [text(todo.status_label())]),
            ])]),
            td(
                [
                    class("p-3 cursor-pointer text-green-500 hover:text-green-700"),
                    on_click(move |_| Msg::OpenEdit(id)),
                ],
                [text("✎")],
            ),
            td(
                [
                    class("p-3 cursor-pointer text-red-500 hover:text-red-700"),
                    on_click(move |_| Msg::DeleteTodo(id)),
                ],
                [text("🗑")],
            ),
        ])
    }

    fn view_dialog(&self) -> Node<Msg> {
        let (Some(mode), Some(draft)) = (self.dialog.mode(), self.dialog.draft()) else {
            return span([], []);
        };
        let (heading, submit_label) = match mode {
            DialogMode::Create => ("Add New Task", "Add"),
            DialogMode::Edit(_) => ("Edit Task", "Update"),
        };

        div([class("fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-40")], [
            div([class("bg-white rounded-xl p-6 w-96")], [
                h2([class("text-xl font-semibold mb-4")], [text(heading)]),
                form(
                    [
                        class("space-y-4"),
                        on_submit(|event| {
                            event.prevent_default();
                            Msg::SubmitDialog
                        }),
                    ],
                    [
                        input(
                            [
                                r#type("text"),
                                placeholder("Title"),
                                value(&draft.text),
                                on_input(|event| Msg::SetDraftText(event.value())),
                                class("w-full border px-3 py-2 rounded outline-none"),
                            ],
                            [],
                        ),
                        input(
                            [
                                r#type("text"),
                                placeholder("Description"),
                                value(&draft.description),
                                on_input(|event| Msg::SetDraftDescription(event.value())),
                                class("w-full border px-3 py-2 rounded outline-none"),
                            ],
                            [],
                        ),
                        div([class("flex justify-end space-x-2")], [
                            button(
                                [
                                    r#type("button"),
                                    on_click(|_| Msg::CancelDialog),
                                    class("cursor-pointer px-4 py-2 rounded bg-gray-200"),
                                ],
                                [text("Cancel")],
                            ),
                            button(
                                [
                                    r#type("submit"),
                                    class("cursor-pointer px-4 py-2 rounded bg-green-600 text-white hover:bg-green-700"),
                                ],
                                [text(submit_label)],
                            ),
                        ]),
                    ],
                ),
            ]),
        ])
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    Program::mount_to_body(Model::default());
}
