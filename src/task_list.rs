//! Task List Controller
//!
//! Client-side state for one list view (dashboard or "today"). Mutations are
//! split in two steps: a synchronous `begin_*` applies the optimistic change
//! and returns a ticket describing the request to send; `finish_*` takes the
//! gateway result and reconciles or reverts. Every ticket carries the list
//! generation, bumped on each Load, so responses that arrive after the list
//! was replaced are discarded instead of applied.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use leptos_dragdrop::{target_index, DropTarget};

use crate::api::TodoQuery;
use crate::error::{ApiError, FieldErrors};
use crate::models::{Priority, Task, TodoPage, TodoPayload};
use crate::time::DueInput;

/// Which endpoint feeds the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView {
    /// `/todos`, filtered server-side
    All,
    /// `/todos/today`, only priority is sent
    Today,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl CompletionFilter {
    pub fn completed_param(self) -> Option<bool> {
        match self {
            CompletionFilter::All => None,
            CompletionFilter::Active => Some(false),
            CompletionFilter::Completed => Some(true),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CompletionFilter::All => "All Tasks",
            CompletionFilter::Active => "Active Tasks",
            CompletionFilter::Completed => "Completed Tasks",
        }
    }
}

/// Search text, completion filter and priority filter of the current view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub completion: CompletionFilter,
    pub search: String,
    pub priority: Option<Priority>,
}

impl Criteria {
    fn search_term(&self) -> Option<String> {
        let term = self.search.trim();
        (!term.is_empty()).then(|| term.to_lowercase())
    }
}

/// Paging state; reset by every Load
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    /// Last page applied, 0 before the first one arrives
    pub page: u32,
    pub page_size: u32,
    pub has_more: bool,
}

/// A page fetch issued by Load or LoadMore
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub generation: u64,
    pub view: ListView,
    pub query: TodoQuery,
}

impl PageRequest {
    pub fn page(&self) -> u32 {
        self.query.page
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Applied,
    /// Criteria changed while the request was in flight
    Stale,
    Failed(ApiError),
}

/// Completion change sent to `/todo/completed/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleTicket {
    pub id: String,
    pub completed: bool,
    /// Set when this toggle opened an undo window; pass to `expire_undo`
    pub undo_token: Option<u64>,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReorderTicket {
    pub id: String,
    /// New order of the moved task; the server renumbers the rest
    pub order: i64,
    previous: Vec<(String, i64)>,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteTicket {
    pub id: String,
    task: Task,
    index: usize,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct UndoWindow {
    token: u64,
}

/// Form input for create and update
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due: DueInput,
}

const DUE_DATE_MESSAGE: &str = "Due date must be in the future.";

/// Due date must be strictly after `now`
pub fn validate_due(due: DueInput, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>, FieldErrors> {
    match due {
        DueInput::Empty => Ok(None),
        DueInput::At(at) if at > now => Ok(Some(at)),
        DueInput::At(_) | DueInput::Invalid => Err(FieldErrors::single("due_date", DUE_DATE_MESSAGE)),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskList {
    view: ListView,
    criteria: Criteria,
    tasks: Vec<Task>,
    cursor: Cursor,
    generation: u64,
    loading: bool,
    loading_more: bool,
    banner: Option<String>,
    /// Completed tasks still shown under "Active", keyed to their undo token
    recently_completed: HashMap<String, u64>,
    undo: Option<(String, UndoWindow)>,
    next_token: u64,
}

impl TaskList {
    pub fn new(view: ListView, page_size: u32) -> Self {
        Self {
            view,
            criteria: Criteria::default(),
            tasks: Vec::new(),
            cursor: Cursor { page: 0, page_size, has_more: false },
            generation: 0,
            loading: false,
            loading_more: false,
            banner: None,
            recently_completed: HashMap::new(),
            undo: None,
            next_token: 0,
        }
    }

    // ========================
    // Accessors
    // ========================

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn set_banner(&mut self, message: impl Into<String>) {
        self.banner = Some(message.into());
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Task the open undo window would restore
    pub fn undo_target(&self) -> Option<&str> {
        self.undo.as_ref().map(|(id, _)| id.as_str())
    }

    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    /// Drag reordering is only meaningful on the unfiltered sequence
    pub fn can_reorder(&self) -> bool {
        self.criteria.search_term().is_none() && self.criteria.completion == CompletionFilter::All
    }

    /// Accumulated tasks that match the current criteria, in display order
    pub fn visible(&self) -> Vec<Task> {
        let term = self.criteria.search_term();
        self.tasks
            .iter()
            .filter(|task| {
                if let Some(term) = &term {
                    if !task.title.to_lowercase().contains(term.as_str()) {
                        return false;
                    }
                }
                let completion_ok = match self.criteria.completion {
                    CompletionFilter::All => true,
                    CompletionFilter::Active => !task.completed || self.recently_completed.contains_key(&task.id),
                    CompletionFilter::Completed => task.completed,
                };
                let priority_ok = self.criteria.priority.map_or(true, |p| task.priority == p);
                completion_ok && priority_ok
            })
            .cloned()
            .collect()
    }

    fn query_for(&self, page: u32) -> TodoQuery {
        let (completed, search) = match self.view {
            ListView::All => {
                let search = self.criteria.search.trim();
                (self.criteria.completion.completed_param(), (!search.is_empty()).then(|| search.to_string()))
            }
            ListView::Today => (None, None),
        };
        TodoQuery {
            page,
            page_size: self.cursor.page_size,
            completed,
            search,
            priority: self.criteria.priority,
        }
    }

    // ========================
    // Load / LoadMore
    // ========================

    /// Apply new criteria. Returns the page-1 request when the server query
    /// changes (or nothing was loaded yet); otherwise the change is local,
    /// as with search in the today view.
    pub fn set_criteria(&mut self, criteria: Criteria) -> Option<PageRequest> {
        let server_side_equal = match self.view {
            ListView::All => criteria == self.criteria,
            ListView::Today => criteria.priority == self.criteria.priority,
        };
        if self.generation > 0 && server_side_equal {
            self.criteria = criteria;
            return None;
        }
        Some(self.begin_load(criteria))
    }

    /// Replace the criteria and request page 1. Any in-flight page becomes stale.
    pub fn begin_load(&mut self, criteria: Criteria) -> PageRequest {
        self.generation += 1;
        self.criteria = criteria;
        self.tasks.clear();
        self.cursor.page = 0;
        self.cursor.has_more = false;
        self.loading = true;
        self.loading_more = false;
        self.banner = None;
        PageRequest {
            generation: self.generation,
            view: self.view,
            query: self.query_for(1),
        }
    }

    pub fn finish_load(&mut self, request: &PageRequest, result: Result<TodoPage, ApiError>) -> PageOutcome {
        if request.generation != self.generation {
            tracing::debug!("discarding stale page {} (generation {})", request.page(), request.generation);
            return PageOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.cursor.has_more = Self::page_is_full(&page, request.query.page_size);
                self.cursor.page = request.page();
                self.tasks = page.items;
                PageOutcome::Applied
            }
            Err(err) => {
                self.tasks.clear();
                self.cursor.has_more = false;
                self.banner = Some(match self.view {
                    ListView::All => "Unable to load your tasks right now.".to_string(),
                    ListView::Today => "Unable to load today's tasks right now.".to_string(),
                });
                PageOutcome::Failed(err)
            }
        }
    }

    /// Next page, or `None` while a load is in flight or nothing is left
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        if self.loading || self.loading_more || !self.cursor.has_more {
            return None;
        }
        self.loading_more = true;
        Some(PageRequest {
            generation: self.generation,
            view: self.view,
            query: self.query_for(self.cursor.page + 1),
        })
    }

    pub fn finish_load_more(&mut self, request: &PageRequest, result: Result<TodoPage, ApiError>) -> PageOutcome {
        if request.generation != self.generation || request.page() != self.cursor.page + 1 {
            tracing::debug!("discarding stale page {} (generation {})", request.page(), request.generation);
            return PageOutcome::Stale;
        }
        self.loading_more = false;
        match result {
            Ok(page) => {
                self.cursor.has_more = Self::page_is_full(&page, request.query.page_size);
                self.cursor.page = request.page();
                for task in page.items {
                    if self.find(&task.id).is_none() {
                        self.tasks.push(task);
                    }
                }
                PageOutcome::Applied
            }
            Err(err) => {
                // No automatic retry from further scroll events
                self.cursor.has_more = false;
                PageOutcome::Failed(err)
            }
        }
    }

    fn page_is_full(page: &TodoPage, page_size: u32) -> bool {
        page.items.len() as u32 >= page_size && page.page.saturating_mul(page_size) < page.total
    }

    // ========================
    // Create / Update
    // ========================

    fn build_payload(draft: &TaskDraft, title: String, now: DateTime<Utc>) -> Result<TodoPayload, FieldErrors> {
        let due_date = validate_due(draft.due, now)?;
        let description = draft.description.trim();
        Ok(TodoPayload {
            title,
            description: (!description.is_empty()).then(|| description.to_string()),
            priority: draft.priority,
            due_date,
        })
    }

    /// Validate a new task before anything is sent
    pub fn prepare_create(draft: &TaskDraft, now: DateTime<Utc>) -> Result<TodoPayload, FieldErrors> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(FieldErrors::single("title", "Title is required."));
        }
        Self::build_payload(draft, title.to_string(), now)
    }

    /// Prepend the created task; errors leave the list untouched. The today
    /// view only shows what the server pages back, so it waits for a Load.
    pub fn finish_create(&mut self, result: Result<Task, ApiError>) -> Result<(), ApiError> {
        let task = result?;
        if self.view == ListView::All && self.find(&task.id).is_none() {
            self.tasks.insert(0, task);
        }
        Ok(())
    }

    /// Validate an edit; a blank title keeps the current one
    pub fn prepare_update(&self, id: &str, draft: &TaskDraft, now: DateTime<Utc>) -> Result<TodoPayload, FieldErrors> {
        let title = match draft.title.trim() {
            "" => self.find(id).map(|t| t.title.clone()).unwrap_or_default(),
            title => title.to_string(),
        };
        if title.is_empty() {
            return Err(FieldErrors::single("title", "Title is required."));
        }
        Self::build_payload(draft, title, now)
    }

    /// Replace the entry with the server's representation
    pub fn finish_update(&mut self, id: &str, result: Result<Task, ApiError>) -> Result<(), ApiError> {
        let updated = result?;
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            *task = updated;
        }
        Ok(())
    }

    /// Local-only priority change
    pub fn cycle_priority(&mut self, id: &str) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.priority = task.priority.cycle();
        }
    }

    // ========================
    // ToggleComplete / Undo
    // ========================

    pub fn begin_toggle(&mut self, id: &str) -> Option<ToggleTicket> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        let completed = task.completed;

        let undo_token = if completed {
            self.next_token += 1;
            let token = self.next_token;
            self.recently_completed.insert(id.to_string(), token);
            self.undo = Some((id.to_string(), UndoWindow { token }));
            Some(token)
        } else {
            self.recently_completed.remove(id);
            if self.undo_target() == Some(id) {
                self.undo = None;
            }
            None
        };

        Some(ToggleTicket {
            id: id.to_string(),
            completed,
            undo_token,
            generation: self.generation,
        })
    }

    pub fn finish_toggle(&mut self, ticket: &ToggleTicket, result: Result<Task, ApiError>) -> Result<(), ApiError> {
        let same_list = ticket.generation == self.generation;
        match result {
            Ok(server) => {
                // A newer toggle of the same task owns the flag now
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == ticket.id && t.completed == ticket.completed) {
                    if same_list {
                        *task = server;
                    }
                }
                Ok(())
            }
            Err(err) => {
                if same_list {
                    if let Some(task) = self.tasks.iter_mut().find(|t| t.id == ticket.id && t.completed == ticket.completed) {
                        task.completed = !ticket.completed;
                    }
                    if let Some(token) = ticket.undo_token {
                        self.expire_undo(token);
                    }
                }
                Err(err)
            }
        }
    }

    /// Reverse the last completion while its window is open
    pub fn undo(&mut self) -> Option<ToggleTicket> {
        let (id, _) = self.undo.take()?;
        match self.find(&id) {
            Some(task) if task.completed => self.begin_toggle(&id),
            _ => None,
        }
    }

    /// Close the undo window opened with `token` (timer elapsed)
    pub fn expire_undo(&mut self, token: u64) {
        self.recently_completed.retain(|_, t| *t != token);
        if matches!(self.undo, Some((_, window)) if window.token == token) {
            self.undo = None;
        }
    }

    // ========================
    // Reorder
    // ========================

    /// Move `id` to `target` and renumber orders 1..=N
    pub fn begin_reorder(&mut self, id: &str, target: usize) -> Option<ReorderTicket> {
        if !self.can_reorder() || target >= self.tasks.len() {
            return None;
        }
        let source = self.tasks.iter().position(|t| t.id == id)?;
        if source == target {
            return None;
        }
        let previous = self.tasks.iter().map(|t| (t.id.clone(), t.order)).collect();

        let moved = self.tasks.remove(source);
        self.tasks.insert(target, moved);
        self.renumber();

        Some(ReorderTicket {
            id: id.to_string(),
            order: self.tasks[target].order,
            previous,
            generation: self.generation,
        })
    }

    /// Resolve a drop against the loaded sequence, which may hold rows the
    /// current priority filter hides
    pub fn begin_drop(&mut self, id: &str, target: &DropTarget<String>) -> Option<ReorderTicket> {
        let keys: Vec<String> = self.tasks.iter().map(|t| t.id.clone()).collect();
        let index = target_index(&keys, &id.to_string(), target)?;
        self.begin_reorder(id, index)
    }

    fn renumber(&mut self) {
        for (index, task) in self.tasks.iter_mut().enumerate() {
            task.order = index as i64 + 1;
        }
    }

    pub fn finish_reorder(&mut self, ticket: &ReorderTicket, result: Result<(), ApiError>) -> Result<(), ApiError> {
        let Err(err) = result else { return Ok(()) };
        if ticket.generation == self.generation {
            let rank: HashMap<&str, (usize, i64)> = ticket
                .previous
                .iter()
                .enumerate()
                .map(|(index, (id, order))| (id.as_str(), (index, *order)))
                .collect();
            // Tasks appended after the move keep their place at the end
            self.tasks.sort_by_key(|t| rank.get(t.id.as_str()).map_or(usize::MAX, |(index, _)| *index));
            for task in &mut self.tasks {
                if let Some((_, order)) = rank.get(task.id.as_str()) {
                    task.order = *order;
                }
            }
        }
        Err(err)
    }

    // ========================
    // Delete
    // ========================

    pub fn begin_delete(&mut self, id: &str) -> Option<DeleteTicket> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        let task = self.tasks.remove(index);
        Some(DeleteTicket {
            id: id.to_string(),
            task,
            index,
            generation: self.generation,
        })
    }

    /// On failure the task goes back exactly where it was
    pub fn finish_delete(&mut self, ticket: DeleteTicket, result: Result<(), ApiError>) -> Result<(), ApiError> {
        match result {
            Ok(()) => {
                self.recently_completed.remove(&ticket.id);
                if self.undo_target() == Some(ticket.id.as_str()) {
                    self.undo = None;
                }
                Ok(())
            }
            Err(err) => {
                if ticket.generation == self.generation && self.find(&ticket.id).is_none() {
                    let index = ticket.index.min(self.tasks.len());
                    self.tasks.insert(index, ticket.task);
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn task(id: &str, order: i64, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: None,
            completed,
            due_date: None,
            order,
            priority: Priority::Medium,
        }
    }

    fn page(items: Vec<Task>, page: u32, page_size: u32, total: u32) -> TodoPage {
        TodoPage { items, page, page_size, total }
    }

    fn ids(list: &TaskList) -> Vec<&str> {
        list.tasks().iter().map(|t| t.id.as_str()).collect()
    }

    fn offline() -> ApiError {
        ApiError::Network("offline".to_string())
    }

    /// List loaded with the given tasks as a single, final page
    fn loaded(tasks: Vec<Task>) -> TaskList {
        let mut list = TaskList::new(ListView::All, 20);
        let request = list.begin_load(Criteria::default());
        let total = tasks.len() as u32;
        list.finish_load(&request, Ok(page(tasks, 1, 20, total)));
        list
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap()
    }

    fn draft(title: &str, due: DueInput) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: String::new(),
            priority: Priority::High,
            due,
        }
    }

    #[test]
    fn test_load_then_load_more_concatenates_pages() {
        let mut list = TaskList::new(ListView::All, 2);
        let first = list.begin_load(Criteria::default());
        assert_eq!(first.page(), 1);
        assert_eq!(list.finish_load(&first, Ok(page(vec![task("a", 1, false), task("b", 2, false)], 1, 2, 5))), PageOutcome::Applied);

        let second = list.begin_load_more().expect("more pages");
        assert_eq!(second.page(), 2);
        list.finish_load_more(&second, Ok(page(vec![task("c", 3, false), task("d", 4, false)], 2, 2, 5)));

        let third = list.begin_load_more().expect("more pages");
        list.finish_load_more(&third, Ok(page(vec![task("e", 5, false)], 3, 2, 5)));

        assert_eq!(ids(&list), vec!["a", "b", "c", "d", "e"]);
        assert!(!list.cursor().has_more);
        assert_eq!(list.begin_load_more(), None);
    }

    #[test]
    fn test_load_more_never_runs_twice_concurrently() {
        let mut list = TaskList::new(ListView::All, 1);
        let first = list.begin_load(Criteria::default());
        list.finish_load(&first, Ok(page(vec![task("a", 1, false)], 1, 1, 3)));

        let pending = list.begin_load_more();
        assert!(pending.is_some());
        assert_eq!(list.begin_load_more(), None);
    }

    #[test]
    fn test_load_more_is_noop_while_loading() {
        let mut list = TaskList::new(ListView::All, 1);
        let _ = list.begin_load(Criteria::default());
        assert_eq!(list.begin_load_more(), None);
    }

    #[test]
    fn test_criteria_change_discards_in_flight_page() {
        let mut list = TaskList::new(ListView::All, 1);
        let first = list.begin_load(Criteria::default());
        list.finish_load(&first, Ok(page(vec![task("a", 1, false)], 1, 1, 3)));
        let more = list.begin_load_more().unwrap();

        let completed_only = Criteria { completion: CompletionFilter::Completed, ..Criteria::default() };
        let reload = list.begin_load(completed_only);
        list.finish_load(&reload, Ok(page(vec![task("x", 1, true)], 1, 1, 2)));

        assert_eq!(list.finish_load_more(&more, Ok(page(vec![task("b", 2, false)], 2, 1, 3))), PageOutcome::Stale);
        assert_eq!(ids(&list), vec!["x"]);
        // The stale response must not unblock or block the new cursor
        assert!(list.begin_load_more().is_some());
    }

    #[test]
    fn test_stale_first_page_is_discarded() {
        let mut list = TaskList::new(ListView::All, 20);
        let old = list.begin_load(Criteria::default());
        let current = list.begin_load(Criteria { search: "milk".into(), ..Criteria::default() });
        list.finish_load(&current, Ok(page(vec![task("m", 1, false)], 1, 20, 1)));
        assert_eq!(list.finish_load(&old, Ok(page(vec![task("a", 1, false)], 1, 20, 1))), PageOutcome::Stale);
        assert_eq!(ids(&list), vec!["m"]);
    }

    #[test]
    fn test_same_page_is_not_appended_twice() {
        let mut list = TaskList::new(ListView::All, 1);
        let first = list.begin_load(Criteria::default());
        list.finish_load(&first, Ok(page(vec![task("a", 1, false)], 1, 1, 3)));
        let more = list.begin_load_more().unwrap();
        let response = page(vec![task("b", 2, false)], 2, 1, 3);
        list.finish_load_more(&more, Ok(response.clone()));
        assert_eq!(list.finish_load_more(&more, Ok(response)), PageOutcome::Stale);
        assert_eq!(ids(&list), vec!["a", "b"]);
    }

    #[test]
    fn test_completed_filter_query_and_append() {
        let mut list = TaskList::new(ListView::All, 1);
        let criteria = Criteria { completion: CompletionFilter::Completed, ..Criteria::default() };
        let first = list.begin_load(criteria);
        assert_eq!(first.query.completed, Some(true));
        list.finish_load(&first, Ok(page(vec![task("a", 1, true)], 1, 1, 2)));
        let more = list.begin_load_more().unwrap();
        assert_eq!(more.query.completed, Some(true));
        list.finish_load_more(&more, Ok(page(vec![task("b", 2, true)], 2, 1, 2)));
        assert!(list.visible().iter().all(|t| t.completed));
        assert_eq!(list.visible().len(), 2);
    }

    #[test]
    fn test_load_failure_leaves_list_empty_with_banner() {
        let mut list = TaskList::new(ListView::All, 20);
        let request = list.begin_load(Criteria::default());
        assert!(matches!(list.finish_load(&request, Err(offline())), PageOutcome::Failed(_)));
        assert!(list.tasks().is_empty());
        assert!(list.banner().is_some());
        assert!(!list.is_loading());
    }

    #[test]
    fn test_failed_load_more_stops_paging() {
        let mut list = TaskList::new(ListView::All, 1);
        let first = list.begin_load(Criteria::default());
        list.finish_load(&first, Ok(page(vec![task("a", 1, false)], 1, 1, 3)));
        let more = list.begin_load_more().unwrap();
        assert!(matches!(list.finish_load_more(&more, Err(offline())), PageOutcome::Failed(_)));
        assert_eq!(ids(&list), vec!["a"]);
        assert_eq!(list.begin_load_more(), None);
    }

    #[test]
    fn test_today_view_sends_only_priority() {
        let mut list = TaskList::new(ListView::Today, 20);
        let request = list.begin_load(Criteria {
            completion: CompletionFilter::All,
            search: "report".into(),
            priority: Some(Priority::Low),
        });
        assert_eq!(request.view, ListView::Today);
        assert_eq!(request.query.search, None);
        assert_eq!(request.query.priority, Some(Priority::Low));
    }

    #[test]
    fn test_today_search_is_local() {
        let mut list = TaskList::new(ListView::Today, 20);
        let first = list.set_criteria(Criteria::default()).expect("initial load");
        list.finish_load(&first, Ok(page(vec![task("a", 1, false), task("b", 2, false)], 1, 20, 2)));

        let search = Criteria { search: "task a".into(), ..Criteria::default() };
        assert_eq!(list.set_criteria(search), None);
        assert_eq!(list.visible().len(), 1);

        let high = Criteria { priority: Some(Priority::High), ..Criteria::default() };
        assert!(list.set_criteria(high).is_some());
    }

    #[test]
    fn test_dashboard_search_reloads() {
        let mut list = loaded(vec![task("a", 1, false)]);
        assert_eq!(list.set_criteria(Criteria::default()), None);
        let request = list.set_criteria(Criteria { search: " milk ".into(), ..Criteria::default() }).expect("reload");
        assert_eq!(request.query.search.as_deref(), Some("milk"));
        assert!(list.tasks().is_empty());
    }

    #[test]
    fn test_visible_applies_search_case_insensitively() {
        let mut list = loaded(vec![task("a", 1, false), task("b", 2, false)]);
        list.tasks[0].title = "Buy MILK".into();
        list.criteria.search = "milk".into();
        let visible = list.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "a");
    }

    #[test]
    fn test_delete_failure_restores_exact_list() {
        let mut list = loaded(vec![task("a", 1, false), task("b", 2, false), task("c", 3, false)]);
        let before = list.tasks().to_vec();
        let ticket = list.begin_delete("b").unwrap();
        assert_eq!(ids(&list), vec!["a", "c"]);
        assert!(list.finish_delete(ticket, Err(offline())).is_err());
        assert_eq!(list.tasks(), before.as_slice());
    }

    #[test]
    fn test_delete_success_keeps_task_removed() {
        let mut list = loaded(vec![task("a", 1, false), task("b", 2, false)]);
        let ticket = list.begin_delete("a").unwrap();
        assert!(list.finish_delete(ticket, Ok(())).is_ok());
        assert_eq!(ids(&list), vec!["b"]);
    }

    #[test]
    fn test_reorder_example() {
        let mut list = loaded(vec![task("A", 1, false), task("B", 2, false), task("C", 3, false)]);
        let ticket = list.begin_reorder("C", 0).unwrap();
        assert_eq!(ticket.order, 1);
        let orders: Vec<(&str, i64)> = list.tasks().iter().map(|t| (t.id.as_str(), t.order)).collect();
        assert_eq!(orders, vec![("C", 1), ("A", 2), ("B", 3)]);
    }

    #[test]
    fn test_reorder_renumbers_contiguously_for_every_target() {
        for target in 0..5 {
            let mut list = loaded((1..=5).map(|i| task(&i.to_string(), i * 10, false)).collect());
            let ticket = list.begin_reorder("3", target);
            if target == 2 {
                assert!(ticket.is_none());
                continue;
            }
            let ticket = ticket.unwrap();
            assert_eq!(list.tasks()[target].id, "3");
            assert_eq!(ticket.order, target as i64 + 1);
            let orders: Vec<i64> = list.tasks().iter().map(|t| t.order).collect();
            assert_eq!(orders, vec![1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn test_reorder_rejected_when_filtered_or_out_of_range() {
        let mut list = loaded(vec![task("a", 1, false), task("b", 2, false)]);
        assert!(list.begin_reorder("a", 2).is_none());
        assert!(list.begin_reorder("zz", 0).is_none());
        list.criteria.search = "task".into();
        assert!(list.begin_reorder("b", 0).is_none());
        list.criteria.search.clear();
        list.criteria.completion = CompletionFilter::Active;
        assert!(!list.can_reorder());
        assert!(list.begin_reorder("b", 0).is_none());
    }

    #[test]
    fn test_reorder_failure_restores_previous_sequence() {
        let mut list = loaded(vec![task("a", 4, false), task("b", 7, false), task("c", 9, false)]);
        let before = list.tasks().to_vec();
        let ticket = list.begin_reorder("a", 2).unwrap();
        assert_eq!(ids(&list), vec!["b", "c", "a"]);
        assert!(list.finish_reorder(&ticket, Err(offline())).is_err());
        assert_eq!(list.tasks(), before.as_slice());
    }

    #[test]
    fn test_reorder_success_keeps_new_sequence() {
        let mut list = loaded(vec![task("a", 1, false), task("b", 2, false)]);
        let ticket = list.begin_reorder("b", 0).unwrap();
        assert!(list.finish_reorder(&ticket, Ok(())).is_ok());
        assert_eq!(ids(&list), vec!["b", "a"]);
    }

    #[test]
    fn test_toggle_opens_undo_window_and_undo_restores() {
        let mut list = loaded(vec![task("a", 1, false)]);
        let ticket = list.begin_toggle("a").unwrap();
        assert!(ticket.completed);
        assert!(ticket.undo_token.is_some());
        assert!(list.find("a").unwrap().completed);
        assert_eq!(list.undo_target(), Some("a"));

        let reverse = list.undo().expect("undo within window");
        assert!(!reverse.completed);
        assert!(!list.find("a").unwrap().completed);
        assert_eq!(list.undo_target(), None);
    }

    #[test]
    fn test_undo_window_expires() {
        let mut list = loaded(vec![task("a", 1, false)]);
        let ticket = list.begin_toggle("a").unwrap();
        list.expire_undo(ticket.undo_token.unwrap());
        assert_eq!(list.undo_target(), None);
        assert_eq!(list.undo(), None);
        assert!(list.find("a").unwrap().completed);
    }

    #[test]
    fn test_old_timer_does_not_close_newer_window() {
        let mut list = loaded(vec![task("a", 1, false), task("b", 2, false)]);
        let first = list.begin_toggle("a").unwrap();
        let _second = list.begin_toggle("b").unwrap();
        list.expire_undo(first.undo_token.unwrap());
        assert_eq!(list.undo_target(), Some("b"));
    }

    #[test]
    fn test_recently_completed_stays_visible_under_active() {
        let mut list = loaded(vec![task("a", 1, false), task("b", 2, false)]);
        list.criteria.completion = CompletionFilter::Active;
        let ticket = list.begin_toggle("a").unwrap();
        assert_eq!(list.visible().len(), 2);
        list.expire_undo(ticket.undo_token.unwrap());
        let visible = list.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "b");
    }

    #[test]
    fn test_toggle_failure_reverts_flag() {
        let mut list = loaded(vec![task("a", 1, false)]);
        let ticket = list.begin_toggle("a").unwrap();
        assert!(list.finish_toggle(&ticket, Err(offline())).is_err());
        assert!(!list.find("a").unwrap().completed);
        assert_eq!(list.undo_target(), None);
    }

    #[test]
    fn test_toggle_success_takes_server_copy() {
        let mut list = loaded(vec![task("a", 1, false)]);
        let ticket = list.begin_toggle("a").unwrap();
        let mut server = task("a", 1, true);
        server.title = "Renamed on server".into();
        assert!(list.finish_toggle(&ticket, Ok(server)).is_ok());
        assert_eq!(list.find("a").unwrap().title, "Renamed on server");
    }

    #[test]
    fn test_create_rejects_due_date_not_in_future() {
        let at_now = draft("Pay rent", DueInput::At(now()));
        let err = TaskList::prepare_create(&at_now, now()).unwrap_err();
        assert!(err.get("due_date").is_some());

        let past = draft("Pay rent", DueInput::At(now() - Duration::minutes(1)));
        assert!(TaskList::prepare_create(&past, now()).is_err());
        assert!(TaskList::prepare_create(&draft("Pay rent", DueInput::Invalid), now()).is_err());
    }

    #[test]
    fn test_create_accepts_future_due_date() {
        let future = now() + Duration::minutes(1);
        let payload = TaskList::prepare_create(&draft("  Pay rent ", DueInput::At(future)), now()).unwrap();
        assert_eq!(payload.title, "Pay rent");
        assert_eq!(payload.due_date, Some(future));
        assert_eq!(payload.description, None);
    }

    #[test]
    fn test_create_requires_title() {
        let err = TaskList::prepare_create(&draft("   ", DueInput::Empty), now()).unwrap_err();
        assert!(err.get("title").is_some());
    }

    #[test]
    fn test_finish_create_prepends_and_keeps_list_on_error() {
        let mut list = loaded(vec![task("a", 1, false)]);
        list.finish_create(Ok(task("new", 9, false))).unwrap();
        assert_eq!(ids(&list), vec!["new", "a"]);

        let errors = FieldErrors::single("title", "Too long");
        let result = list.finish_create(Err(ApiError::Validation(errors.clone())));
        assert_eq!(result.unwrap_err().field_errors(), Some(&errors));
        assert_eq!(ids(&list), vec!["new", "a"]);
    }

    #[test]
    fn test_update_replaces_entry_and_blank_title_keeps_current() {
        let mut list = loaded(vec![task("a", 1, false), task("b", 2, false)]);
        let payload = list.prepare_update("b", &draft("", DueInput::Empty), now()).unwrap();
        assert_eq!(payload.title, "Task b");

        let mut server = task("b", 2, false);
        server.title = "Edited".into();
        list.finish_update("b", Ok(server)).unwrap();
        assert_eq!(list.find("b").unwrap().title, "Edited");
        assert_eq!(ids(&list), vec!["a", "b"]);

        assert!(list.finish_update("a", Err(offline())).is_err());
        assert_eq!(list.find("a").unwrap().title, "Task a");
    }

    #[test]
    fn test_cycle_priority_and_active_count() {
        let mut list = loaded(vec![task("a", 1, false), task("b", 2, true)]);
        list.cycle_priority("a");
        assert_eq!(list.find("a").unwrap().priority, Priority::High);
        assert_eq!(list.active_count(), 1);
    }

    #[test]
    fn test_today_view_does_not_prepend_created_task() {
        let mut list = TaskList::new(ListView::Today, 20);
        let request = list.begin_load(Criteria::default());
        list.finish_load(&request, Ok(page(vec![task("due_today", 1, false)], 1, 20, 1)));

        assert!(list.finish_create(Ok(task("no_due", 2, false))).is_ok());
        assert_eq!(ids(&list), vec!["due_today"]);
    }

    /// High-priority dashboard with `a`, `b`, `c`
    fn loaded_high_priority() -> TaskList {
        let mut list = TaskList::new(ListView::All, 20);
        let request = list.begin_load(Criteria { priority: Some(Priority::High), ..Criteria::default() });
        let tasks = ["a", "b", "c"]
            .iter()
            .enumerate()
            .map(|(i, id)| Task { priority: Priority::High, ..task(id, i as i64 + 1, false) })
            .collect();
        list.finish_load(&request, Ok(page(tasks, 1, 20, 3)));
        list
    }

    #[test]
    fn test_drop_resolves_against_loaded_tasks_when_some_are_hidden() {
        let mut list = loaded_high_priority();
        list.cycle_priority("a");
        let visible: Vec<String> = list.visible().into_iter().map(|t| t.id).collect();
        assert_eq!(visible, vec!["b", "c"]);

        let ticket = list.begin_drop("b", &DropTarget::End).expect("drop applies");
        assert_eq!(ticket.order, 3);
        assert_eq!(ids(&list), vec!["a", "c", "b"]);
        let visible: Vec<String> = list.visible().into_iter().map(|t| t.id).collect();
        assert_eq!(visible, vec!["c", "b"]);
    }

    #[test]
    fn test_drop_on_item_takes_its_slot_in_loaded_sequence() {
        let mut list = loaded_high_priority();
        list.cycle_priority("b");
        let ticket = list.begin_drop("c", &DropTarget::Item("a".to_string())).expect("drop applies");
        assert_eq!(ticket.order, 1);
        assert_eq!(ids(&list), vec!["c", "a", "b"]);
        assert!(list.begin_drop("zz", &DropTarget::End).is_none());
    }

    /// Reload the default dashboard with fresh tasks
    fn reload(list: &mut TaskList, tasks: Vec<Task>) {
        let request = list.begin_load(Criteria::default());
        let total = tasks.len() as u32;
        list.finish_load(&request, Ok(page(tasks, 1, 20, total)));
    }

    #[test]
    fn test_delete_failure_after_reload_does_not_reinsert() {
        let mut list = loaded(vec![task("a", 1, false), task("b", 2, false)]);
        let ticket = list.begin_delete("a").unwrap();
        reload(&mut list, vec![task("x", 1, false)]);

        assert!(list.finish_delete(ticket, Err(offline())).is_err());
        assert_eq!(ids(&list), vec!["x"]);
    }

    #[test]
    fn test_toggle_failure_after_reload_keeps_new_flag() {
        let mut list = loaded(vec![task("a", 1, false)]);
        let ticket = list.begin_toggle("a").unwrap();
        // Server copy after the reload already shows the completion
        reload(&mut list, vec![task("a", 1, true), task("b", 2, false)]);

        assert!(list.finish_toggle(&ticket, Err(offline())).is_err());
        assert!(list.find("a").unwrap().completed);
        assert!(!list.find("b").unwrap().completed);
    }

    #[test]
    fn test_toggle_success_after_reload_keeps_reloaded_copy() {
        let mut list = loaded(vec![task("a", 1, false)]);
        let ticket = list.begin_toggle("a").unwrap();
        let mut reloaded = task("a", 1, true);
        reloaded.title = "Fresh".into();
        reload(&mut list, vec![reloaded]);

        let mut server = task("a", 1, true);
        server.title = "Old response".into();
        assert!(list.finish_toggle(&ticket, Ok(server)).is_ok());
        assert_eq!(list.find("a").unwrap().title, "Fresh");
    }

    #[test]
    fn test_reorder_failure_after_reload_keeps_new_sequence() {
        let mut list = loaded(vec![task("a", 1, false), task("b", 2, false), task("c", 3, false)]);
        let ticket = list.begin_reorder("a", 2).unwrap();
        reload(&mut list, vec![task("c", 1, false), task("a", 2, false), task("b", 3, false)]);
        let after_reload = list.tasks().to_vec();

        assert!(list.finish_reorder(&ticket, Err(offline())).is_err());
        assert_eq!(list.tasks(), after_reload.as_slice());
    }
}
