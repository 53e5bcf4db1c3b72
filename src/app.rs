use crate::task::Task;

/// Which form field receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Deadline,
    Session,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Title => Field::Deadline,
            Field::Deadline => Field::Session,
            Field::Session => Field::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Title => Field::Session,
            Field::Deadline => Field::Title,
            Field::Session => Field::Deadline,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Deadline => "Deadline",
            Field::Session => "Session",
        }
    }
}

/// Buffers backing the three entry fields.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub deadline: String,
    pub session: String,
}

impl TaskForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Deadline => &self.deadline,
            Field::Session => &self.session,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Deadline => &mut self.deadline,
            Field::Session => &mut self.session,
        }
    }

    /// Build an unsaved task from the buffers.
    pub fn to_task(&self) -> Task {
        Task {
            id: None,
            title: self.title.clone(),
            deadline: self.deadline.clone(),
            session: self.session.clone(),
            completed: false,
        }
    }

    fn load(&mut self, task: &Task) {
        self.title = task.title.clone();
        self.deadline = task.deadline.clone();
        self.session = task.session.clone();
    }
}

/// All screen state: the task collection, the form, the editing
/// reference, the focus, and the list cursor. Network results are folded
/// in through the `apply_*` methods; nothing here performs I/O.
#[derive(Debug, Default)]
pub struct App {
    pub tasks: Vec<Task>,
    pub form: TaskForm,
    /// Id of the task the form is bound to, if any. `Some` means submit
    /// updates; `None` means submit creates.
    pub editing: Option<u64>,
    /// `Some` while the form has keyboard focus.
    pub focus: Option<Field>,
    pub selected: usize,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Replace the collection with a fresh fetch. Completion is forced
    /// off on every item; the cursor is clamped to the new length.
    pub fn apply_fetched(&mut self, mut tasks: Vec<Task>) {
        for task in &mut tasks {
            task.completed = false;
        }
        self.tasks = tasks;
        self.selected = self.selected.min(self.tasks.len().saturating_sub(1));
    }

    /// Prepend a freshly created task and clear the form.
    pub fn apply_created(&mut self, task: Task) {
        self.tasks.insert(0, task);
        self.form.clear();
        self.focus = None;
    }

    /// Replace the matching item with the server's representation and
    /// leave editing mode.
    pub fn apply_updated(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
        }
        self.editing = None;
        self.form.clear();
        self.focus = None;
    }

    /// Remove the task with the given id.
    pub fn apply_deleted(&mut self, id: u64) {
        self.tasks.retain(|t| t.id != Some(id));
        self.selected = self.selected.min(self.tasks.len().saturating_sub(1));
    }

    /// Mark the task with the given id completed. Local only: no
    /// network call, no effect on any other task.
    pub fn complete(&mut self, id: u64) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == Some(id)) {
            task.completed = true;
        }
    }

    /// Focus the form for a new task, dropping any editing binding.
    pub fn start_creating(&mut self) {
        self.editing = None;
        self.form.clear();
        self.focus = Some(Field::Title);
    }

    /// Bind the form to the selected task. Ignored for completed tasks
    /// and tasks that were never persisted.
    pub fn start_editing(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        if task.completed {
            return;
        }
        let Some(id) = task.id else {
            return;
        };
        let task = task.clone();
        self.editing = Some(id);
        self.form.load(&task);
        self.focus = Some(Field::Title);
    }

    /// Drop form focus and any editing binding, discarding the buffers.
    pub fn cancel_form(&mut self) {
        self.editing = None;
        self.form.clear();
        self.focus = None;
    }
}
