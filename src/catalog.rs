//! Static table of what to show for each detected emotion.

use crate::emotion::EmotionLabel;

/// Color in OpenCV channel order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BgrColor {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl BgrColor {
    pub const WHITE: BgrColor = BgrColor::new(255, 255, 255);
    pub const BLACK: BgrColor = BgrColor::new(0, 0, 0);
    pub const RED: BgrColor = BgrColor::new(0, 0, 255);
    pub const GREEN: BgrColor = BgrColor::new(0, 255, 0);
    pub const BLUE: BgrColor = BgrColor::new(255, 0, 0);
    pub const YELLOW: BgrColor = BgrColor::new(0, 255, 255);
    pub const BROWN: BgrColor = BgrColor::new(0, 128, 128);
    pub const PURPLE: BgrColor = BgrColor::new(147, 20, 255);

    #[must_use]
    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }
}

/// Message, optional recommendation and display color for one emotion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseEntry {
    pub message: &'static str,
    pub action: Option<&'static str>,
    pub color: BgrColor,
}

static NEUTRAL: ResponseEntry = ResponseEntry {
    message: "Student appears neutral",
    action: Some("Consider introducing interactive elements"),
    color: BgrColor::WHITE,
};

// No recommendation is defined for frustration; the action line is left out.
static ANGRY: ResponseEntry = ResponseEntry {
    message: "Student appears frustrated",
    action: None,
    color: BgrColor::RED,
};

static DISGUST: ResponseEntry = ResponseEntry {
    message: "Student appears not interested",
    action: Some("Add fun activities, use real-world examples"),
    color: BgrColor::BROWN,
};

static FEAR: ResponseEntry = ResponseEntry {
    message: "Student appears anxious/nervous",
    action: Some("Create supportive environment"),
    color: BgrColor::PURPLE,
};

static HAPPY: ResponseEntry = ResponseEntry {
    message: "Student appears excited",
    action: Some("Keep up the energy, encourage participation"),
    color: BgrColor::GREEN,
};

static SAD: ResponseEntry = ResponseEntry {
    message: "Student appears overwhelmed",
    action: Some("Break down concepts, provide guidance"),
    color: BgrColor::BLUE,
};

static SURPRISE: ResponseEntry = ResponseEntry {
    message: "Student appears curious",
    action: Some("Provide challenging problems"),
    color: BgrColor::YELLOW,
};

/// Look up the response for a label
#[must_use]
pub fn response_for(label: EmotionLabel) -> &'static ResponseEntry {
    match label {
        EmotionLabel::Neutral => &NEUTRAL,
        EmotionLabel::Angry => &ANGRY,
        EmotionLabel::Disgust => &DISGUST,
        EmotionLabel::Fear => &FEAR,
        EmotionLabel::Happy => &HAPPY,
        EmotionLabel::Sad => &SAD,
        EmotionLabel::Surprise => &SURPRISE,
    }
}
