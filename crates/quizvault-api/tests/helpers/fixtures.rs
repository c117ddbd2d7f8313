use image::{ImageFormat, Rgb, RgbImage};
use serde_json::{json, Value};
use std::io::Cursor;

pub fn encode_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Vec::new();
    RgbImage::from_pixel(width, height, Rgb([120, 80, 40]))
        .write_to(&mut Cursor::new(&mut buffer), format)
        .expect("encode test image");
    buffer
}

pub fn choice_question(prompt: &str) -> Value {
    json!({
        "type": "SINGLE_CHOICE",
        "prompt": prompt,
        "options": ["Yes", "No"],
        "correctAnswer": "Yes",
        "feedback": ""
    })
}

/// A bank exercising every question type
pub fn full_document() -> Value {
    json!({
        "version": "1.0",
        "bank": {
            "title": "General knowledge",
            "description": "<p>Mixed <strong>questions</strong></p>",
            "timeLimit": 20,
            "randomQuestions": false,
            "randomAnswers": true,
            "passingScore": 60,
            "feedbackTiming": "IMMEDIATE",
            "questionCount": 7,
            "maxAttempts": 3
        },
        "questions": [
            {
                "type": "SINGLE_CHOICE",
                "prompt": "<p>Largest planet?</p>",
                "promptImage": "https://cdn.example.com/planets.png",
                "options": ["Jupiter", "Mars", "Venus"],
                "correctAnswer": "Jupiter",
                "feedback": "Jupiter is a gas giant"
            },
            {
                "type": "MULTIPLE_CHOICE",
                "prompt": "Prime numbers",
                "options": [{ "id": "a", "text": "2" }, { "id": "b", "text": "4" }, { "id": "c", "text": "5" }],
                "correctAnswer": ["a", "c"],
                "feedback": ""
            },
            {
                "type": "TRUE_FALSE",
                "prompt": "Water boils at 100 °C at sea level",
                "options": ["true", "false"],
                "correctAnswer": "true",
                "feedback": ""
            },
            {
                "type": "SHORT_ANSWER",
                "prompt": "Chemical symbol of gold",
                "options": { "caseSensitive": true },
                "correctAnswer": ["Au"],
                "feedback": ""
            },
            {
                "type": "FILL_BLANK",
                "prompt": "The sky is ___",
                "options": {},
                "correctAnswer": "blue",
                "feedback": ""
            },
            {
                "type": "ORDERING",
                "prompt": "Order by size",
                "options": ["Moon", "Earth", "Sun"],
                "correctAnswer": ["Moon", "Earth", "Sun"],
                "feedback": ""
            },
            {
                "type": "MATCHING",
                "prompt": "Match capitals",
                "options": [{ "left": "France", "right": "Paris" }, { "left": "Italy", "right": "Rome" }],
                "correctAnswer": { "France": "Paris", "Italy": "Rome" },
                "feedback": "",
                "referenceLink": "javascript:alert(1)"
            }
        ]
    })
}
