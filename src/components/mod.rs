//! UI Components
//!
//! Reusable Leptos components.

mod auth_forms;
mod delete_confirm_button;
mod edit_task_modal;
mod filter_bar;
mod form_field;
mod new_task_form;
mod notification_stack;
mod sidebar;
mod task_list_view;
mod task_row;
mod undo_toast;

pub use auth_forms::{LoginForm, RegisterForm};
pub use delete_confirm_button::DeleteConfirmButton;
pub use edit_task_modal::EditTaskModal;
pub use filter_bar::FilterBar;
pub use form_field::{input_class, FieldMessage};
pub use new_task_form::NewTaskForm;
pub use notification_stack::NotificationStack;
pub use sidebar::Sidebar;
pub use task_list_view::TaskListView;
pub use task_row::{TaskActions, TaskRow};
pub use undo_toast::UndoToast;
