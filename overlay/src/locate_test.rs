use super::*;

fn scroller(client_height: f64) -> ScrollCandidate {
    ScrollCandidate {
        overflow_scrollable: true,
        scroll_height: client_height * 3.0,
        client_height,
        inside_figure: false,
        inside_control_group: false,
    }
}

// =============================================================
// eligibility filters
// =============================================================

#[test]
fn plain_tall_scroller_is_eligible() {
    assert!(scroller(700.0).eligible());
}

#[test]
fn non_scrollable_overflow_is_rejected() {
    let candidate = ScrollCandidate {
        overflow_scrollable: false,
        ..scroller(700.0)
    };
    assert!(!candidate.eligible());
}

#[test]
fn content_that_fits_is_rejected() {
    let candidate = ScrollCandidate {
        scroll_height: 700.0,
        ..scroller(700.0)
    };
    assert!(!candidate.eligible());
}

#[test]
fn short_widgets_are_rejected() {
    assert!(!scroller(120.0).eligible());
    assert!(!scroller(MIN_SCROLLER_HEIGHT).eligible());
    assert!(scroller(MIN_SCROLLER_HEIGHT + 1.0).eligible());
}

#[test]
fn figure_nested_scroller_is_rejected() {
    let candidate = ScrollCandidate {
        inside_figure: true,
        ..scroller(700.0)
    };
    assert!(!candidate.eligible());
}

#[test]
fn control_group_nested_scroller_is_rejected() {
    let candidate = ScrollCandidate {
        inside_control_group: true,
        ..scroller(700.0)
    };
    assert!(!candidate.eligible());
}

// =============================================================
// best_candidate
// =============================================================

#[test]
fn empty_list_has_no_winner() {
    assert_eq!(best_candidate(&[]), None);
}

#[test]
fn all_ineligible_has_no_winner() {
    let candidates = [scroller(100.0), scroller(200.0)];
    assert_eq!(best_candidate(&candidates), None);
}

#[test]
fn largest_visible_height_wins() {
    let candidates = [scroller(400.0), scroller(900.0), scroller(600.0)];
    assert_eq!(best_candidate(&candidates), Some(1));
}

#[test]
fn ineligible_giant_loses_to_eligible_scroller() {
    let giant_widget = ScrollCandidate {
        inside_figure: true,
        ..scroller(2000.0)
    };
    let candidates = [giant_widget, scroller(500.0)];
    assert_eq!(best_candidate(&candidates), Some(1));
}

#[test]
fn ties_keep_the_earlier_candidate() {
    let candidates = [scroller(500.0), scroller(500.0)];
    assert_eq!(best_candidate(&candidates), Some(0));
}
