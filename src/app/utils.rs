// src/app/utils.rs
use crate::app::data::{Actor, Movie};

/// "2h 28m" for 148 minutes; "N/A" when the duration is unknown.
pub fn format_duration(minutes: Option<i32>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{}h {}m", m / 60, m % 60),
        _ => "N/A".to_string(),
    }
}

pub fn format_age(age: Option<i32>) -> String {
    match age {
        Some(a) if a > 0 => format!("{a} years"),
        _ => "Age unknown".to_string(),
    }
}

/// Caption under a movie card: title, plus the runtime when known.
pub fn movie_caption(movie: &Movie) -> String {
    match movie.duration {
        Some(_) => format!("{}\n{}", movie.title, format_duration(movie.duration)),
        None => movie.title.clone(),
    }
}

/// Caption under an actor card: name, plus the age when known.
pub fn actor_caption(actor: &Actor) -> String {
    match actor.age {
        Some(_) => format!("{}\n{}", actor.name, format_age(actor.age)),
        None => actor.name.clone(),
    }
}

/// Clip a label so painted card text never overflows its rect.
pub fn clip_label(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Open a playback link in the system browser. Returns an error string for
/// the status line when the platform launcher fails.
pub fn open_in_browser(url: &str) -> Result<(), String> {
    let launcher = if cfg!(target_os = "windows") {
        ("cmd", vec!["/C", "start", "", url])
    } else if cfg!(target_os = "macos") {
        ("open", vec![url])
    } else {
        ("xdg-open", vec![url])
    };
    std::process::Command::new(launcher.0)
        .args(&launcher.1)
        .spawn()
        .map(|_| ())
        .map_err(|e| format!("could not open browser: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_format_like_the_catalog_cards() {
        assert_eq!(format_duration(Some(148)), "2h 28m");
        assert_eq!(format_duration(Some(90)), "1h 30m");
        assert_eq!(format_duration(Some(45)), "0h 45m");
        assert_eq!(format_duration(None), "N/A");
        assert_eq!(format_duration(Some(0)), "N/A");
    }

    #[test]
    fn labels_clip_with_ellipsis() {
        assert_eq!(clip_label("Inception", 20), "Inception");
        assert_eq!(clip_label("The Wolf of Wall Street", 12), "The Wolf of…");
    }
}
