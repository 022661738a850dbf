#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{Comment, Quizz, User};

    /// A quizz the current user has neither liked, completed nor hidden
    pub fn quizz(id: &str) -> Quizz {
        Quizz::new(id, &format!("Quizz {}", id), "", "owner-1")
    }

    pub fn liked_quizz(id: &str, like_id: &str) -> Quizz {
        let mut quizz = quizz(id);
        quizz.like = false;
        quizz.like_id = Some(like_id.to_string());
        quizz
    }

    pub fn completed_quizz(id: &str, realise_id: &str) -> Quizz {
        let mut quizz = quizz(id);
        quizz.realise = false;
        quizz.realise_id = Some(realise_id.to_string());
        quizz
    }

    pub fn comment(id: &str, quizz_id: &str, text: &str) -> Comment {
        Comment {
            id: Some(id.to_string()),
            text: text.to_string(),
            author_id: test_user().id,
            quizz_id: quizz_id.to_string(),
            created_at: None,
        }
    }

    pub fn test_user() -> User {
        User::new("user-1").with_username("testuser")
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::LinkState;

    #[test]
    fn test_fixtures_quizz() {
        let q = quizz("a");
        assert_eq!(q.id, "a");
        assert!(q.like);
        assert!(q.realise);
        assert!(!q.hidden);
    }

    #[test]
    fn test_fixtures_link_states() {
        assert_eq!(liked_quizz("a", "L1").like_state(), LinkState::Active("L1".to_string()));
        assert_eq!(
            completed_quizz("a", "R1").realise_state(),
            LinkState::Active("R1".to_string())
        );
    }

    #[test]
    fn test_fixtures_comment() {
        let c = comment("c-1", "a", "hi");
        assert_eq!(c.author_id, test_user().id);
        assert_eq!(c.quizz_id, "a");
    }
}
