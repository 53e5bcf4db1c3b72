use serde::{Deserialize, Serialize};

/// A single task as exchanged with the remote endpoint.
///
/// `id` is assigned by the server and absent until the task has been
/// persisted. `completed` is client-local: it is sent on create/update
/// bodies but any server-provided value is discarded on decode, so every
/// fetched task starts out not completed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Task {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    pub deadline: String,
    // The upstream API calls this field "sesi".
    #[serde(rename = "sesi")]
    pub session: String,
    #[serde(skip_deserializing)]
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_list_item_defaults_completion() {
        let tasks: Vec<Task> =
            serde_json::from_str(r#"[{"id":1,"title":"A","deadline":"d1","sesi":"s1"}]"#).unwrap();
        assert_eq!(
            tasks,
            vec![Task {
                id: Some(1),
                title: "A".to_string(),
                deadline: "d1".to_string(),
                session: "s1".to_string(),
                completed: false,
            }]
        );
    }

    #[test]
    fn decode_discards_server_completion() {
        let task: Task = serde_json::from_str(
            r#"{"id":7,"title":"B","deadline":"d2","sesi":"s2","completed":true}"#,
        )
        .unwrap();
        assert!(!task.completed);
    }

    #[test]
    fn encode_unsaved_task_omits_id() {
        let task = Task {
            id: None,
            title: "B".to_string(),
            deadline: "tomorrow".to_string(),
            session: "evening".to_string(),
            completed: false,
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "B",
                "deadline": "tomorrow",
                "sesi": "evening",
                "completed": false,
            })
        );
    }

    #[test]
    fn encode_saved_task_keeps_id() {
        let task = Task {
            id: Some(42),
            title: "C".to_string(),
            deadline: String::new(),
            session: String::new(),
            completed: false,
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["id"], 42);
    }
}
