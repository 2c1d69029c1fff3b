use crate::session::Session;
use crate::types::Content;
use chrono::Utc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let session = Session::new(Some("gemini-2.5-flash"));

        assert!(!session.id.is_empty());
        assert_eq!(session.model, Some("gemini-2.5-flash".to_string()));
        assert!(session.history.is_empty());
        assert!(session.created_at <= Utc::now());
        assert_eq!(session.created_at, session.updated_at);
    }

    #[test]
    fn test_add_content() {
        let mut session = Session::new(None);
        let initial_updated = session.updated_at;

        session.add_content(Content::user_text("Hello"));

        assert_eq!(session.history.len(), 1);
        assert!(session.updated_at >= initial_updated);
        assert_eq!(session.history[0].text(), Some("Hello".to_string()));
    }

    #[test]
    fn test_checkpoint_and_rollback() {
        let mut session = Session::new(None);
        session.add_content(Content::user_text("first"));
        session.add_content(Content::model_text("reply"));

        let checkpoint = session.checkpoint();
        assert_eq!(checkpoint, 2);

        session.add_content(Content::user_text("second"));
        session.rollback(checkpoint);

        assert_eq!(session.history.len(), 2);
        assert_eq!(session.history[1], Content::model_text("reply"));

        // rolling back to a later point is a no-op
        session.rollback(10);
        assert_eq!(session.history.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut session = Session::new(None);
        session.add_content(Content::user_text("first"));
        session.clear();
        assert!(session.history.is_empty());
    }

    #[test]
    fn test_session_serialization() {
        let mut session = Session::new(Some("gemini-2.5-flash"));
        session.add_content(Content::user_text("Test message"));

        let json_str = serde_json::to_string(&session).expect("Failed to serialize session");
        let deserialized: Session =
            serde_json::from_str(&json_str).expect("Failed to deserialize session");

        assert_eq!(session.id, deserialized.id);
        assert_eq!(session.model, deserialized.model);
        assert_eq!(session.history, deserialized.history);
    }

    #[test]
    fn test_unique_ids() {
        assert_ne!(Session::new(None).id, Session::new(None).id);
    }
}
