use std::fmt::Write;

use restaurant_ranking::{App, Category, Ranked, User};

const EMPTY: &str = "No ratings yet";

fn badge<T>(place: &Ranked<T>) -> String {
    if place.highlighted {
        format!("[#{}]", place.rank + 1)
    } else {
        format!(" #{} ", place.rank + 1)
    }
}

pub(super) fn restaurant_list(app: &App) -> String {
    app.restaurant_list()
        .iter()
        .enumerate()
        .fold(String::new(), |mut out, (i, name)| {
            let _ = writeln!(out, "{}. {name}", i + 1);
            out
        })
}

pub(super) fn stats(app: &App) -> String {
    format!(
        "Restaurants: {}\nRated: {}",
        app.total_count(),
        app.rated_count()
    )
}

pub(super) fn draft(app: &App) -> String {
    let draft = app.draft();
    let mut out = format!(
        "User: {}\nRestaurant: {}\n",
        app.user_name(draft.selected_user()),
        draft.restaurant().unwrap_or("-")
    );
    for category in Category::ALL {
        let _ = writeln!(out, "{category}: {}", draft.score(category));
    }
    let _ = write!(out, "Average: {}", app.live_average());
    if !app.can_commit() {
        out.push_str("\n(choose a restaurant to save)");
    }
    out
}

pub(super) fn user_ranking(app: &App, user: User) -> String {
    let ranking = app.rank_by_user(user);
    let mut out = format!("Ranking of {}\n", app.user_name(user));
    if ranking.is_empty() {
        out.push_str(EMPTY);
        return out;
    }
    for place in &ranking {
        let rating = &place.entry.rating;
        let _ = writeln!(
            out,
            "{} {}  {}  (starter {} / main {} / dessert {})",
            badge(place),
            place.entry.restaurant,
            rating.average(),
            rating.starter(),
            rating.main(),
            rating.dessert()
        );
    }
    out
}

pub(super) fn overall_ranking(app: &App) -> String {
    let ranking = app.rank_overall();
    let mut out = String::from("Overall ranking\n");
    if ranking.is_empty() {
        out.push_str(EMPTY);
        return out;
    }
    for place in &ranking {
        let _ = write!(
            out,
            "{} {}  {}",
            badge(place),
            place.entry.name,
            place.entry.overall
        );
        // only the users that rated it
        for user in User::ALL {
            if let Some(score) = place.entry.score_for(user) {
                let _ = write!(out, "  {} {score}", app.user_name(user));
            }
        }
        out.push('\n');
    }
    out
}
