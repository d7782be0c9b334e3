#[cfg(test)]
#[path = "gradient_test.rs"]
mod tests;

use rand::Rng;

/// Display-only color pairs applied to session cards. The palette is fixed;
/// a session picks one pair at creation time and keeps it for life.
pub const PALETTE: [Gradient; 8] = [
    Gradient {
        from: "#f472b6",
        to: "#a855f7",
    },
    Gradient {
        from: "#60a5fa",
        to: "#22d3ee",
    },
    Gradient {
        from: "#34d399",
        to: "#14b8a6",
    },
    Gradient {
        from: "#fbbf24",
        to: "#f97316",
    },
    Gradient {
        from: "#f87171",
        to: "#ec4899",
    },
    Gradient {
        from: "#818cf8",
        to: "#6366f1",
    },
    Gradient {
        from: "#2dd4bf",
        to: "#0ea5e9",
    },
    Gradient {
        from: "#c084fc",
        to: "#e879f9",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gradient {
    pub from: &'static str,
    pub to: &'static str,
}

pub struct GradientPalette {}

impl GradientPalette {
    /// Pure selection by index, wrapping around the palette. The random
    /// source stays at the outermost call site so tests pass indexes.
    pub fn pick_with(index: usize) -> Gradient {
        return PALETTE[index % PALETTE.len()];
    }

    pub fn random() -> Gradient {
        return GradientPalette::pick_with(rand::thread_rng().gen_range(0..PALETTE.len()));
    }
}
