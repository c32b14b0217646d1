#![forbid(unsafe_code)]

//! The onboarding deck.
//!
//! Content only: the controller never looks inside a [`Slide`].

/// Gradient family behind a slide's icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Green,
    Blue,
    Purple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub id: u32,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Icon glyph name in the host's icon set.
    pub icon: &'static str,
    pub accent: Accent,
}

impl Slide {
    /// The "Get Started" button only appears on the last slide.
    #[must_use]
    pub fn shows_get_started(index: usize, count: usize) -> bool {
        count > 0 && index + 1 == count
    }
}

pub static DEFAULT_DECK: [Slide; 4] = [
    Slide {
        id: 1,
        title: "Start With Your Income",
        subtitle: "Tell us your monthly income and how much you want to save.",
        icon: "wallet-outline",
        accent: Accent::Green,
    },
    Slide {
        id: 2,
        title: "AI Finds Smart Cut-Offs",
        subtitle: "We look at your expenses and suggest where you can cut back, like dining out, \
                   transport, or subscriptions.",
        icon: "analytics-outline",
        accent: Accent::Blue,
    },
    Slide {
        id: 3,
        title: "Reach Your Savings Goal",
        subtitle: "We help you stay on track to save 10%, 20%, or more each month.",
        icon: "trending-up-outline",
        accent: Accent::Green,
    },
    Slide {
        id: 4,
        title: "Your Money, Your Rules",
        subtitle: "You decide what's flexible and what's not. We only suggest realistic changes.",
        icon: "options-outline",
        accent: Accent::Purple,
    },
];
