//! The questions shipped with the app.

use super::questionnaire::Question;

const AGREEMENT: [&str; 5] = [
    "Strongly disagree",
    "Somewhat disagree",
    "Neutral",
    "Somewhat agree",
    "Strongly agree",
];

const YES_NO: [&str; 2] = ["Yes", "No"];

pub fn default_questions() -> Vec<Question> {
    vec![
        Question::multiple_choice(
            "1. Which social media platform do you use most often?",
            ["Instagram", "YouTube", "Twitter", "Facebook", "TikTok"],
        ),
        Question::multiple_choice(
            "2. Do you often use the platform's 'save' feature?",
            AGREEMENT,
        ),
        Question::open_ended(
            "3. Of everything saved on your phone, roughly how many items are in the largest category?",
        ),
        Question::multiple_choice(
            "4. How much of the information you come across while browsing do you feel you collect by choice?",
            AGREEMENT,
        ),
        Question::multiple_choice(
            "5. Have you ever hoarded information thinking 'I might need this someday', then never found it again or forgot it?",
            YES_NO,
        ),
        Question::multiple_choice(
            "6. Have you ever refreshed a feed over and over, out of habit, hoping for something new?",
            YES_NO,
        ),
        Question::multiple_choice("7. Do you feel uneasy about recommendation algorithms?", YES_NO),
        Question::open_ended(
            "8. If algorithms in digital spaces have ever made you feel helpless or afraid, describe it.",
        ),
        Question::open_ended("9. What have you lost in digital spaces?"),
    ]
}
