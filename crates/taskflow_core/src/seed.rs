//! First-load fixtures.
//!
//! Used only as defaults for state entries that are missing from the
//! store. Timestamps are fixed so seeded state is reproducible.

use crate::model::message::{Message, Sender};
use crate::model::project::Project;
use crate::model::task::Task;
use crate::model::user::User;
use crate::model::{Priority, Status};
use chrono::{DateTime, NaiveDate, Utc};

/// Unread-message badge shown before any interaction.
pub const INITIAL_NOTIFICATIONS: u32 = 2;

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn at(year: i32, month: u32, d: u32, hour: u32) -> DateTime<Utc> {
    day(year, month, d)
        .and_hms_opt(hour, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

pub fn users() -> Vec<User> {
    [
        ("1", "Ana Silva", "ana@taskflow.com", "👩‍💼", "Project Manager"),
        ("2", "Carlos Santos", "carlos@taskflow.com", "👨‍💻", "Developer"),
        ("3", "Maria Oliveira", "maria@taskflow.com", "🎨", "Designer"),
        ("4", "João Costa", "joao@taskflow.com", "📊", "Analyst"),
        ("5", "Sofia Lima", "sofia@taskflow.com", "✨", "QA Engineer"),
    ]
    .into_iter()
    .map(|(id, name, email, avatar, role)| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        avatar: avatar.to_string(),
        role: role.to_string(),
    })
    .collect()
}

pub fn projects() -> Vec<Project> {
    let updated = at(2024, 2, 1, 9);
    vec![
        Project {
            id: "1".to_string(),
            name: "E-commerce Platform".to_string(),
            company: "Google Inc.".to_string(),
            logo: "🛒".to_string(),
            progress: 75,
            completed_tasks: 18,
            total_tasks: 24,
            priority: Priority::High,
            status: Status::InProgress,
            due_date: day(2024, 2, 15),
            platforms: strings(&["Web", "Mobile"]),
            team_members: strings(&["👩‍💼", "👨‍💻", "🎨", "📊"]),
            description: Some("End-to-end e-commerce platform".to_string()),
            created_at: at(2024, 1, 1, 9),
            updated_at: updated,
        },
        Project {
            id: "2".to_string(),
            name: "Mobile Banking App".to_string(),
            company: "Slack Corporation".to_string(),
            logo: "🏦".to_string(),
            progress: 45,
            completed_tasks: 9,
            total_tasks: 20,
            priority: Priority::Medium,
            status: Status::InProgress,
            due_date: day(2024, 3, 20),
            platforms: strings(&["iOS", "Android"]),
            team_members: strings(&["👨‍💻", "🎨", "✨"]),
            description: Some("Banking app with advanced security features".to_string()),
            created_at: at(2024, 1, 15, 9),
            updated_at: updated,
        },
        Project {
            id: "3".to_string(),
            name: "Dashboard Analytics".to_string(),
            company: "Microsoft".to_string(),
            logo: "📊".to_string(),
            progress: 90,
            completed_tasks: 27,
            total_tasks: 30,
            priority: Priority::Low,
            status: Status::Completed,
            due_date: day(2024, 1, 30),
            platforms: strings(&["Web"]),
            team_members: strings(&["📊", "👩‍💼", "👨‍💻"]),
            description: Some("Real-time data analysis dashboard".to_string()),
            created_at: at(2023, 12, 1, 9),
            updated_at: updated,
        },
    ]
}

struct TaskSeed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    priority: Priority,
    status: Status,
    due: (i32, u32, u32),
    project_id: &'static str,
    estimated: f32,
    actual: Option<f32>,
    tags: &'static [&'static str],
    assignee: &'static str,
}

const TASK_SEEDS: &[TaskSeed] = &[
    TaskSeed {
        id: "1",
        title: "Create homepage wireframes",
        description: "Detailed wireframes for the landing page",
        priority: Priority::High,
        status: Status::InProgress,
        due: (2024, 2, 10),
        project_id: "1",
        estimated: 8.0,
        actual: Some(5.0),
        tags: &["design", "wireframe"],
        assignee: "3",
    },
    TaskSeed {
        id: "2",
        title: "Implement authentication",
        description: "User sign-in and registration",
        priority: Priority::High,
        status: Status::Completed,
        due: (2024, 1, 25),
        project_id: "1",
        estimated: 16.0,
        actual: Some(14.0),
        tags: &["backend", "security"],
        assignee: "2",
    },
    TaskSeed {
        id: "3",
        title: "Payment flow design",
        description: "Interface for payment processing",
        priority: Priority::Medium,
        status: Status::Pending,
        due: (2024, 2, 20),
        project_id: "1",
        estimated: 12.0,
        actual: None,
        tags: &["design", "payment"],
        assignee: "3",
    },
    TaskSeed {
        id: "4",
        title: "Security testing",
        description: "Full security audit of the app",
        priority: Priority::High,
        status: Status::Pending,
        due: (2024, 3, 15),
        project_id: "2",
        estimated: 20.0,
        actual: None,
        tags: &["security", "testing"],
        assignee: "5",
    },
    TaskSeed {
        id: "5",
        title: "Performance tuning",
        description: "Improve load times",
        priority: Priority::Medium,
        status: Status::InProgress,
        due: (2024, 2, 28),
        project_id: "2",
        estimated: 10.0,
        actual: Some(3.0),
        tags: &["performance", "optimization"],
        assignee: "2",
    },
    TaskSeed {
        id: "6",
        title: "API documentation",
        description: "Write complete API reference",
        priority: Priority::Low,
        status: Status::Completed,
        due: (2024, 1, 20),
        project_id: "3",
        estimated: 6.0,
        actual: Some(8.0),
        tags: &["documentation", "api"],
        assignee: "4",
    },
    TaskSeed {
        id: "7",
        title: "Automatic backups",
        description: "Scheduled data backup job",
        priority: Priority::High,
        status: Status::Overdue,
        due: (2024, 1, 30),
        project_id: "2",
        estimated: 6.0,
        actual: None,
        tags: &["backup", "data"],
        assignee: "2",
    },
    TaskSeed {
        id: "8",
        title: "Custom reports",
        description: "User-defined report generation",
        priority: Priority::Medium,
        status: Status::Completed,
        due: (2024, 1, 25),
        project_id: "3",
        estimated: 14.0,
        actual: Some(16.0),
        tags: &["reports", "customization"],
        assignee: "4",
    },
];

pub fn tasks() -> Vec<Task> {
    let updated = at(2024, 2, 1, 9);
    TASK_SEEDS
        .iter()
        .map(|seed| {
            let (year, month, d) = seed.due;
            let due = day(year, month, d);
            Task {
                id: seed.id.to_string(),
                title: seed.title.to_string(),
                description: Some(seed.description.to_string()),
                completed: seed.status == Status::Completed,
                priority: seed.priority,
                status: seed.status,
                due_date: Some(due),
                project_id: Some(seed.project_id.to_string()),
                estimated_time: Some(seed.estimated),
                actual_time: seed.actual,
                tags: strings(seed.tags),
                assigned_to: Some(seed.assignee.to_string()),
                created_at: at(2024, 1, 5, 9),
                updated_at: updated,
            }
        })
        .collect()
}

pub fn messages() -> Vec<Message> {
    [
        ("1", "Ana Silva", "👩‍💼", "How is the e-commerce project going?", "2h", true, 10),
        ("2", "Carlos Santos", "👨‍💻", "I need help with the payment API integration", "4h", true, 8),
        ("3", "Maria Oliveira", "🎨", "The wireframes are ready for review", "1d", false, 2),
    ]
    .into_iter()
    .map(|(id, name, avatar, body, timestamp, unread, hour)| Message {
        id: id.to_string(),
        sender: Sender {
            name: name.to_string(),
            avatar: avatar.to_string(),
        },
        body: body.to_string(),
        timestamp: timestamp.to_string(),
        unread,
        created_at: at(2024, 2, 1, hour),
    })
    .collect()
}
