//! The single seed-data source. Both storage backends bootstrap from this
//! table: the memory store on every construction, the sqlite store only when
//! its questions table is empty.

pub struct SeedQuestion {
    pub text: &'static str,
    pub category: &'static str,
}

pub const SAMPLE_QUESTIONS: &[SeedQuestion] = &[
    SeedQuestion {
        text: "If you could have any magical power for one day, what would you do with it and why?",
        category: "imagination",
    },
    SeedQuestion {
        text: "What's a childhood dream you had that you'd love to revisit as an adult?",
        category: "personal",
    },
    SeedQuestion {
        text: "If you could create a new holiday, what would it celebrate and how would people observe it?",
        category: "creativity",
    },
    SeedQuestion {
        text: "What's something you've learned recently that completely changed your perspective?",
        category: "growth",
    },
    SeedQuestion {
        text: "If you could have dinner with any fictional character, who would it be and what would you ask them?",
        category: "imagination",
    },
    SeedQuestion {
        text: "What's a small act of kindness someone did for you that you'll never forget?",
        category: "gratitude",
    },
    SeedQuestion {
        text: "If you could master any skill instantly, what would it be and how would you use it?",
        category: "personal",
    },
    SeedQuestion {
        text: "What's the most beautiful place you've ever been, and what made it special?",
        category: "experiences",
    },
    SeedQuestion {
        text: "If you could send a message to your past self, what would you say?",
        category: "reflection",
    },
    SeedQuestion {
        text: "What's something you're curious about that you'd love to explore more?",
        category: "curiosity",
    },
];
