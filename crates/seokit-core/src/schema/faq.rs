use serde::Serialize;

use super::{JsonLd, non_empty};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename = "Answer")]
pub struct Answer {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename = "Question", rename_all = "camelCase")]
pub struct Question {
    pub name: String,
    pub accepted_answer: Answer,
}

impl Question {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            name: question.into(),
            accepted_answer: Answer {
                text: answer.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename = "FAQPage", rename_all = "camelCase")]
pub struct FaqPage {
    pub main_entity: Vec<Question>,
}

impl FaqPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question(mut self, question: impl Into<String>, answer: impl Into<String>) -> Self {
        self.main_entity.push(Question::new(question, answer));
        self
    }

    pub fn remove(&mut self, index: usize) -> Option<Question> {
        (index < self.main_entity.len()).then(|| self.main_entity.remove(index))
    }
}

impl JsonLd for FaqPage {
    fn missing_required(&self) -> Vec<&'static str> {
        if self.main_entity.is_empty() {
            return vec!["mainEntity"];
        }
        let mut missing = Vec::new();
        if self.main_entity.iter().any(|q| !non_empty(&q.name)) {
            missing.push("mainEntity.name");
        }
        if self.main_entity.iter().any(|q| !non_empty(&q.accepted_answer.text)) {
            missing.push("mainEntity.acceptedAnswer.text");
        }
        missing
    }
}
