use exam_core::model::Session;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteItemVm {
    pub index: usize,
    pub number: usize,
    pub answered: bool,
    pub current: bool,
}

impl PaletteItemVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        match (self.current, self.answered) {
            (true, _) => "palette-item current",
            (false, true) => "palette-item answered",
            (false, false) => "palette-item",
        }
    }
}

/// Everything the quiz screen shows for the question under the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub header: String,
    pub counter: String,
    pub text: String,
    pub options: Vec<OptionVm>,
    pub answered: String,
    pub can_prev: bool,
    pub can_next: bool,
    pub palette: Vec<PaletteItemVm>,
}

impl QuestionVm {
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        let question = session.current_question();
        let selected = session.current_answer();
        let progress = session.progress();

        let options = question
            .options()
            .iter()
            .enumerate()
            .map(|(index, label)| OptionVm {
                index,
                label: label.clone(),
                selected: selected == Some(index),
            })
            .collect();

        let palette = session
            .answers()
            .iter()
            .enumerate()
            .map(|(index, answer)| PaletteItemVm {
                index,
                number: index + 1,
                answered: answer.is_some(),
                current: index == session.current_index(),
            })
            .collect();

        Self {
            header: format!(
                "Candidate: {} • Test: {}",
                session.candidate().label(),
                session.set().display_title()
            ),
            counter: format!(
                "Question {} of {}",
                session.current_index() + 1,
                session.len()
            ),
            text: question.text().to_owned(),
            options,
            answered: format!("Answered: {}/{}", progress.answered, progress.total),
            can_prev: session.can_retreat(),
            can_next: session.can_advance(),
            palette,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use exam_core::model::{Candidate, Question, QuestionId, QuestionSet, SetId};
    use exam_core::time::fixed_now;

    use super::*;

    fn session() -> Session {
        let questions = ["Capital of France?", "2 + 2?"]
            .iter()
            .enumerate()
            .map(|(i, text)| {
                Question::new(
                    QuestionId::new(i.to_string()),
                    *text,
                    vec!["Paris".into(), "4".into()],
                    i,
                )
                .unwrap()
            })
            .collect();
        let set = Arc::new(QuestionSet::new(
            SetId::new("mix"),
            Some("Mixed".into()),
            questions,
        ));
        Session::start(set, Candidate::new("Ada", Some("A1")).unwrap(), fixed_now()).unwrap()
    }

    #[test]
    fn first_question_projection() {
        let mut s = session();
        s.answer_current(0).unwrap();
        let vm = QuestionVm::from_session(&s);

        assert_eq!(vm.header, "Candidate: Ada (A1) • Test: Mixed");
        assert_eq!(vm.counter, "Question 1 of 2");
        assert_eq!(vm.text, "Capital of France?");
        assert!(vm.options[0].selected);
        assert!(!vm.options[1].selected);
        assert_eq!(vm.answered, "Answered: 1/2");
        assert!(!vm.can_prev);
        assert!(vm.can_next);
        assert!(vm.palette[0].answered && vm.palette[0].current);
        assert!(!vm.palette[1].answered);
        assert_eq!(vm.palette[1].class(), "palette-item");
    }

    #[test]
    fn last_question_disables_next() {
        let mut s = session();
        s.advance();
        let vm = QuestionVm::from_session(&s);
        assert_eq!(vm.counter, "Question 2 of 2");
        assert!(vm.can_prev);
        assert!(!vm.can_next);
        assert!(vm.options.iter().all(|o| !o.selected));
        assert!(vm.palette[1].current);
    }
}
