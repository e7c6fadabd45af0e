//! Task Store: reducer-driven task state with whole-state persistence.
//!
//! # Responsibility
//! - Translate task operations into `TodoAction`s and reduce them with the
//!   pure `reduce` function.
//! - Persist the full `TodoState` after every transition.
//! - Derive the filtered view on every read.
//!
//! # Invariants
//! - `next_id` never decreases, so ids handed out by `add_todo` are never
//!   reused within a session, even after removals.
//! - Operations on a missing id are silent no-ops.
//! - A failed save is logged and swallowed; in-memory state is kept, so
//!   memory and storage may diverge until the next successful save.

use crate::clock::{Clock, SystemClock};
use crate::model::shared_list::SharedList;
use crate::model::state::TodoState;
use crate::model::todo::{Priority, Todo, TodoFilter, TodoId, TodoPatch};
use crate::repo::snapshot_repo::TodoSnapshotRepository;
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

/// One state transition of the Task Store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoAction {
    AddTodo {
        text: String,
        priority: Priority,
        due_date: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    },
    RemoveTodo(TodoId),
    ToggleTodo(TodoId),
    UpdateTodo {
        id: TodoId,
        patch: TodoPatch,
    },
    SetFilter(TodoFilter),
    ShareTodoList {
        todo_id: TodoId,
        share_id: String,
    },
    LoadSharedLists(Vec<SharedList>),
    ImportSharedList {
        todos: Vec<Todo>,
        share_id: String,
    },
}

impl TodoAction {
    /// Stable action name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddTodo { .. } => "add_todo",
            Self::RemoveTodo(_) => "remove_todo",
            Self::ToggleTodo(_) => "toggle_todo",
            Self::UpdateTodo { .. } => "update_todo",
            Self::SetFilter(_) => "set_filter",
            Self::ShareTodoList { .. } => "share_todo_list",
            Self::LoadSharedLists(_) => "load_shared_lists",
            Self::ImportSharedList { .. } => "import_shared_list",
        }
    }
}

/// Pure transition function.
///
/// Imported tasks get `id = next_id + incoming.id` and `next_id` then grows
/// by the number of imported tasks. That formula is kept for compatibility
/// with existing saved data and can collide with existing ids.
pub fn reduce(mut state: TodoState, action: TodoAction) -> TodoState {
    match action {
        TodoAction::AddTodo {
            text,
            priority,
            due_date,
            created_at,
        } => {
            let id = state.next_id;
            state
                .todos
                .push(Todo::new(id, text, priority, due_date, created_at));
            state.next_id = id.saturating_add(1);
        }
        TodoAction::RemoveTodo(id) => state.todos.retain(|todo| todo.id != id),
        TodoAction::ToggleTodo(id) => {
            for todo in state.todos.iter_mut().filter(|todo| todo.id == id) {
                todo.completed = !todo.completed;
            }
        }
        TodoAction::UpdateTodo { id, patch } => {
            for todo in state.todos.iter_mut().filter(|todo| todo.id == id) {
                patch.apply_to(todo);
            }
        }
        TodoAction::SetFilter(filter) => state.filter = filter,
        TodoAction::ShareTodoList { todo_id, share_id } => {
            for todo in state.todos.iter_mut().filter(|todo| todo.id == todo_id) {
                todo.shared = true;
                todo.share_id = Some(share_id.clone());
            }
        }
        TodoAction::LoadSharedLists(lists) => state.shared_lists = lists,
        TodoAction::ImportSharedList { todos, share_id } => {
            let base = state.next_id;
            let imported_count = TodoId::try_from(todos.len()).unwrap_or(TodoId::MAX);
            state.todos.extend(todos.into_iter().map(|mut todo| {
                todo.id = base.saturating_add(todo.id);
                todo.imported = Some(true);
                todo.original_share_id = Some(share_id.clone());
                todo
            }));
            state.next_id = base.saturating_add(imported_count);
        }
    }
    state
}

/// Explicitly constructed task state container.
///
/// Owns its snapshot repository and clock; callers pass the store by
/// reference to whatever needs it.
pub struct TodoStore<R: TodoSnapshotRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
    state: TodoState,
}

impl<R: TodoSnapshotRepository> TodoStore<R, SystemClock> {
    /// Rehydrates a store from `repo` using the wall clock.
    pub fn open(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: TodoSnapshotRepository, C: Clock> TodoStore<R, C> {
    /// Rehydrates a store from `repo`.
    ///
    /// Missing, unreadable or todo-less snapshots start from the initial
    /// state (`next_id = 1`, filter `all`).
    pub fn with_clock(repo: R, clock: C) -> Self {
        let state = match repo.load_snapshot() {
            Ok(Some(saved)) => TodoState::rehydrate(saved),
            Ok(None) => TodoState::default(),
            Err(err) => {
                warn!("event=state_load module=store status=error fallback=initial error={err}");
                TodoState::default()
            }
        };
        info!(
            "event=state_load module=store status=ok todo_count={} next_id={}",
            state.todos.len(),
            state.next_id
        );
        Self { repo, clock, state }
    }

    /// Applies one action and persists the resulting state.
    pub fn dispatch(&mut self, action: TodoAction) {
        let name = action.name();
        self.state = reduce(std::mem::take(&mut self.state), action);
        debug!(
            "event=todo_dispatch module=store action={name} todo_count={} next_id={}",
            self.state.todos.len(),
            self.state.next_id
        );
        self.persist();
    }

    /// Appends a task and returns its id.
    ///
    /// Text is stored as given; trimming and emptiness checks belong to the
    /// caller.
    pub fn add_todo(
        &mut self,
        text: impl Into<String>,
        priority: Option<Priority>,
        due_date: Option<DateTime<Utc>>,
    ) -> TodoId {
        let id = self.state.next_id;
        let created_at = self.clock.now();
        self.dispatch(TodoAction::AddTodo {
            text: text.into(),
            priority: priority.unwrap_or_default(),
            due_date,
            created_at,
        });
        id
    }

    pub fn remove_todo(&mut self, id: TodoId) {
        self.dispatch(TodoAction::RemoveTodo(id));
    }

    pub fn toggle_todo(&mut self, id: TodoId) {
        self.dispatch(TodoAction::ToggleTodo(id));
    }

    pub fn update_todo(&mut self, id: TodoId, patch: TodoPatch) {
        self.dispatch(TodoAction::UpdateTodo { id, patch });
    }

    /// Sets the active filter; unknown values are stored verbatim.
    pub fn set_filter(&mut self, filter: impl Into<TodoFilter>) {
        self.dispatch(TodoAction::SetFilter(filter.into()));
    }

    /// Marks a task as shared under `share_id`.
    pub fn share_todo_list(&mut self, todo_id: TodoId, share_id: impl Into<String>) {
        self.dispatch(TodoAction::ShareTodoList {
            todo_id,
            share_id: share_id.into(),
        });
    }

    pub fn load_shared_lists(&mut self, lists: Vec<SharedList>) {
        self.dispatch(TodoAction::LoadSharedLists(lists));
    }

    /// Appends tasks from a shared list, tagging them with `share_id`.
    pub fn import_shared_list(&mut self, todos: Vec<Todo>, share_id: impl Into<String>) {
        self.dispatch(TodoAction::ImportSharedList {
            todos,
            share_id: share_id.into(),
        });
    }

    pub fn todos(&self) -> &[Todo] {
        &self.state.todos
    }

    pub fn get_todo(&self, id: TodoId) -> Option<&Todo> {
        self.state.todos.iter().find(|todo| todo.id == id)
    }

    /// Tasks passing the active filter, in insertion order.
    pub fn filtered_todos(&self) -> Vec<&Todo> {
        self.state
            .todos
            .iter()
            .filter(|todo| self.state.filter.matches(todo))
            .collect()
    }

    pub fn filter(&self) -> &TodoFilter {
        &self.state.filter
    }

    pub fn shared_lists(&self) -> &[SharedList] {
        &self.state.shared_lists
    }

    pub fn next_id(&self) -> TodoId {
        self.state.next_id
    }

    pub fn state(&self) -> &TodoState {
        &self.state
    }

    fn persist(&self) {
        if let Err(err) = self.repo.save_snapshot(&self.state) {
            error!(
                "event=state_save module=store status=error todo_count={} error={err}",
                self.state.todos.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{reduce, TodoAction};
    use crate::model::state::TodoState;
    use crate::model::todo::{Priority, Todo, TodoFilter};
    use chrono::Utc;

    fn add(text: &str) -> TodoAction {
        TodoAction::AddTodo {
            text: text.to_string(),
            priority: Priority::Medium,
            due_date: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn reduce_add_assigns_next_id_and_defaults() {
        let state = reduce(TodoState::default(), add(""));
        assert_eq!(state.next_id, 2);
        let todo = &state.todos[0];
        assert_eq!(todo.id, 1);
        assert_eq!(todo.text, "");
        assert!(!todo.completed);
        assert!(!todo.shared);
    }

    #[test]
    fn reduce_missing_ids_are_noops() {
        let state = reduce(TodoState::default(), add("a"));
        let after = reduce(state.clone(), TodoAction::ToggleTodo(99));
        let after = reduce(after, TodoAction::RemoveTodo(99));
        assert_eq!(after, state);
    }

    #[test]
    fn reduce_import_uses_offset_formula() {
        let mut state = TodoState {
            next_id: 5,
            ..TodoState::default()
        };
        let incoming = vec![
            Todo::new(1, "one", Priority::Low, None, Utc::now()),
            Todo::new(3, "three", Priority::High, None, Utc::now()),
        ];
        state = reduce(
            state,
            TodoAction::ImportSharedList {
                todos: incoming,
                share_id: "abc-123456".to_string(),
            },
        );

        let ids: Vec<_> = state.todos.iter().map(|todo| todo.id).collect();
        assert_eq!(ids, vec![6, 8]);
        assert_eq!(state.next_id, 7);
        assert!(state.todos.iter().all(|todo| todo.is_imported()));
    }

    #[test]
    fn reduce_set_filter_keeps_unknown_value() {
        let state = reduce(
            TodoState::default(),
            TodoAction::SetFilter(TodoFilter::from("starred")),
        );
        assert_eq!(state.filter.as_str(), "starred");
    }
}
