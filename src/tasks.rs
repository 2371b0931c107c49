use thiserror::Error;

/// A phase of an aircraft's operational lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskType {
    Away,
    Land,
    Wait,
    Load,
    Takeoff,
}

impl TaskType {
    pub const ALL: [TaskType; 5] = [
        TaskType::Away,
        TaskType::Land,
        TaskType::Wait,
        TaskType::Load,
        TaskType::Takeoff,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TaskType::Away => "AWAY",
            TaskType::Land => "LAND",
            TaskType::Wait => "WAIT",
            TaskType::Load => "LOAD",
            TaskType::Takeoff => "TAKEOFF",
        }
    }

    pub fn from_name(name: &str) -> Option<TaskType> {
        TaskType::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// Task types legal immediately after this one in a task ring.
    pub fn allowed_successors(&self) -> &'static [TaskType] {
        match self {
            TaskType::Away => &[TaskType::Away, TaskType::Land],
            TaskType::Land => &[TaskType::Wait, TaskType::Load],
            TaskType::Wait => &[TaskType::Wait, TaskType::Load],
            TaskType::Load => &[TaskType::Takeoff],
            TaskType::Takeoff => &[TaskType::Away],
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidTaskSequence {
    #[error("task list cannot be empty")]
    Empty,
    #[error("task {successor} cannot follow task {task}")]
    IllegalSuccessor { task: TaskType, successor: TaskType },
}

/// A single task; `load_percent` is only meaningful for [`TaskType::Load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    task_type: TaskType,
    load_percent: u32,
}

impl Task {
    pub fn new(task_type: TaskType) -> Task {
        Task {
            task_type,
            load_percent: 0,
        }
    }

    pub fn load(load_percent: u32) -> Task {
        Task {
            task_type: TaskType::Load,
            load_percent,
        }
    }

    pub fn task_type(&self) -> TaskType {
        self.task_type
    }

    pub fn load_percent(&self) -> u32 {
        self.load_percent
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.task_type {
            TaskType::Load => write!(f, "LOAD at {}%", self.load_percent),
            other => write!(f, "{}", other),
        }
    }
}

/// An aircraft's ordered, circular list of tasks.
///
/// The list is validated once at construction: every adjacent pair, including
/// the wraparound from last back to first, must satisfy
/// [`TaskType::allowed_successors`]. After that the only mutation is
/// [`TaskList::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
    current: usize,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Result<TaskList, InvalidTaskSequence> {
        if tasks.is_empty() {
            return Err(InvalidTaskSequence::Empty);
        }
        for (i, task) in tasks.iter().enumerate() {
            let successor = tasks[(i + 1) % tasks.len()];
            if !task
                .task_type()
                .allowed_successors()
                .contains(&successor.task_type())
            {
                return Err(InvalidTaskSequence::IllegalSuccessor {
                    task: task.task_type(),
                    successor: successor.task_type(),
                });
            }
        }
        Ok(TaskList { tasks, current: 0 })
    }

    pub fn current(&self) -> Task {
        self.tasks[self.current]
    }

    /// The task that will become current after the next [`TaskList::advance`].
    pub fn peek_next(&self) -> Task {
        self.tasks[(self.current + 1) % self.tasks.len()]
    }

    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.tasks.len();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Iterates over the whole ring starting at the current task.
    pub fn iter_from_current(&self) -> impl Iterator<Item = Task> + '_ {
        (0..self.tasks.len()).map(|i| self.tasks[(self.current + i) % self.tasks.len()])
    }
}

impl std::fmt::Display for TaskList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TaskList currently on {} [{}/{}]",
            self.current(),
            self.current + 1,
            self.tasks.len()
        )
    }
}
