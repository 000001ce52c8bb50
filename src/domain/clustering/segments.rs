//! Display names and colours for k-means cluster labels.
//!
//! Labels map onto the table in order, so label 0 is always shown as
//! "High-Value". Labels past the end wrap around.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerSegment {
    pub label: &'static str,
    /// Hex colour used by the scatter renderer.
    pub color: &'static str,
}

pub const CUSTOMER_SEGMENTS: [CustomerSegment; 4] = [
    CustomerSegment {
        label: "High-Value",
        color: "#ff6b6b",
    },
    CustomerSegment {
        label: "Young Professionals",
        color: "#4ecdc4",
    },
    CustomerSegment {
        label: "Steady Savers",
        color: "#45aaf2",
    },
    CustomerSegment {
        label: "New Customers",
        color: "#fed330",
    },
];

pub fn segment_for_label(label: usize) -> &'static CustomerSegment {
    &CUSTOMER_SEGMENTS[label % CUSTOMER_SEGMENTS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_for_label_wraps() {
        assert_eq!(segment_for_label(0).label, "High-Value");
        assert_eq!(segment_for_label(3).label, "New Customers");
        assert_eq!(segment_for_label(5), segment_for_label(1));
        assert_eq!(segment_for_label(6).color, "#45aaf2");
    }
}
