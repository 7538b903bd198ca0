use serde::Serialize;

pub const QUESTION_COUNT: usize = 30;

/// The 30 DASS-42 statements retained by feature selection, in the order the
/// prediction service expects them (`q1` is index 0).
pub const QUESTIONS: [&str; QUESTION_COUNT] = [
    "I found myself getting upset by quite trivial things.",
    "I couldn't seem to experience any positive feeling at all.",
    "I experienced breathing difficulty (e.g., breathlessness without physical exertion).",
    "I just couldn't seem to get going.",
    "I had a feeling of shakiness (e.g., legs going weak).",
    "I found it difficult to relax.",
    "I found myself in situations that made me so anxious I was relieved when they ended.",
    "I felt that I had nothing to look forward to.",
    "I found myself getting upset rather easily.",
    "I felt that I was using a lot of nervous energy.",
    "I felt sad and depressed.",
    "I felt that I had lost interest in just about everything.",
    "I felt I wasn't worth much as a person.",
    "I felt scared without any good reason.",
    "I felt that life wasn't worthwhile.",
    "I found it hard to wind down.",
    "I couldn't seem to get any enjoyment out of the things I did.",
    "I felt down-hearted and blue.",
    "I found that I was very irritable.",
    "I felt I was close to panic.",
    "I found it hard to calm down after something upset me.",
    "I feared that I would be 'thrown' by some trivial but unfamiliar task.",
    "I found it difficult to tolerate interruptions to what I was doing.",
    "I was in a state of nervous tension.",
    "I felt I was pretty worthless.",
    "I felt terrified.",
    "I felt that life was meaningless.",
    "I found myself getting agitated.",
    "I was worried about situations in which I might panic and make a fool of myself.",
    "I experienced trembling (e.g., in the hands).",
];

pub const INSTRUCTIONS: &str =
    "Please indicate how much each statement applied to you over the past week.";

pub const DISCLAIMER: &str = "This tool is for educational and informational purposes only. \
It is NOT a medical diagnosis. If you are experiencing mental health concerns, \
please consult a qualified mental health professional.";

/// A rating on the 1-4 scale. Only constructible from the closed option set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ResponseValue(u8);

impl ResponseValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn option(self) -> &'static ResponseOption {
        &RESPONSE_OPTIONS[usize::from(self.0 - Self::MIN)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseOption {
    pub value: u8,
    pub label: &'static str,
}

pub const RESPONSE_OPTIONS: [ResponseOption; 4] = [
    ResponseOption {
        value: 1,
        label: "Did not apply to me at all",
    },
    ResponseOption {
        value: 2,
        label: "Applied to me to some degree",
    },
    ResponseOption {
        value: 3,
        label: "Applied to me considerably",
    },
    ResponseOption {
        value: 4,
        label: "Applied to me very much",
    },
];

pub fn question(index: usize) -> Option<&'static str> {
    QUESTIONS.get(index).copied()
}

/// Wire key for a 0-based question index.
pub fn question_key(index: usize) -> String {
    format!("q{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_value_rejects_out_of_range() {
        assert!(ResponseValue::new(0).is_none());
        assert!(ResponseValue::new(5).is_none());
        assert_eq!(ResponseValue::new(3).map(ResponseValue::get), Some(3));
    }

    #[test]
    fn options_cover_scale_in_order() {
        let values: Vec<u8> = RESPONSE_OPTIONS.iter().map(|option| option.value).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
        let value = ResponseValue::new(2).expect("value");
        assert_eq!(value.option().label, "Applied to me to some degree");
    }

    #[test]
    fn question_keys_are_one_based() {
        assert_eq!(question_key(0), "q1");
        assert_eq!(question_key(29), "q30");
        assert!(question(30).is_none());
        assert_eq!(question(29), Some("I experienced trembling (e.g., in the hands)."));
    }
}
