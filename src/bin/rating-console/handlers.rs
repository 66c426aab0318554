use anyhow::Context;
use restaurant_ranking::{App, Category};

use crate::render;

pub(super) const HELP: &str = "\
Commands:
  /restaurant add <name>       add a restaurant
  /restaurant search <pattern> fuzzy search restaurants
  /restaurant list             list restaurants
  /user <name>                 switch the rating user
  /select <restaurant>         pick the restaurant to rate (empty to clear)
  /score <category> <1-5>      score starter, main or dessert
  /draft                       show the rating in progress
  /save                        save the rating
  /cancel                      drop the rating in progress
  /rank <user|all>             show a leaderboard
  /stats                       restaurant counts
  /export                      dump everything as JSON
  /quit                        leave";

pub(super) enum Reply {
    Text(String),
    Silent,
    Quit,
}

enum RestaurantAction {
    Add(String),
    Search(String),
    List,
}

impl RestaurantAction {
    // /restaurant <action> [args...]
    fn new(args: &[&str]) -> Result<Self, &'static str> {
        if args.len() < 2 {
            return Err("too less argument");
        }

        match args[1] {
            "add" => {
                let name = args[2..].join(" ");
                if name.trim().is_empty() {
                    Err("restaurant name is missing")
                } else {
                    Ok(Self::Add(name))
                }
            }
            "search" => {
                if args.len() < 3 {
                    Err("too less argument")
                } else {
                    Ok(Self::Search(args[2..].join(" ")))
                }
            }
            "list" => Ok(Self::List),
            _ => Err("unexpected action"),
        }
    }

    fn run(self, app: &mut App) -> String {
        match self {
            Self::Add(name) => {
                if app.add_restaurant(&name) {
                    "Restaurant added successfully!".to_string()
                } else {
                    format!("{} is already on the list.", name.trim())
                }
            }
            Self::Search(pattern) => {
                let hits = app.search_restaurants(&pattern);
                if hits.is_empty() {
                    format!("Nothing matches {pattern}")
                } else {
                    hits.join("\n")
                }
            }
            Self::List => render::restaurant_list(app),
        }
    }
}

enum Command {
    Restaurant(RestaurantAction),
    User(String),
    Select(String),
    Score(Category, u8),
    Draft,
    Save,
    Cancel,
    Rank(String),
    Stats,
    Export,
    Help,
    Quit,
}

impl Command {
    fn new(args: &[&str]) -> Result<Self, &'static str> {
        let rest = || args[1..].join(" ");
        match args[0] {
            "/restaurant" => RestaurantAction::new(args).map(Self::Restaurant),
            "/user" => {
                if args.len() < 2 {
                    Err("too less argument")
                } else {
                    Ok(Self::User(rest()))
                }
            }
            "/select" => Ok(Self::Select(rest())),
            "/score" => {
                if args.len() < 3 {
                    return Err("too less argument");
                }
                let Ok(category) = args[1].parse() else {
                    return Err("category must be starter, main or dessert")
                };
                let Ok(value) = args[2].parse() else {
                    return Err("Can not parse your argument into number")
                };
                Ok(Self::Score(category, value))
            }
            "/draft" => Ok(Self::Draft),
            "/save" => Ok(Self::Save),
            "/cancel" => Ok(Self::Cancel),
            "/rank" => Ok(Self::Rank(if args.len() < 2 {
                "all".to_string()
            } else {
                rest()
            })),
            "/stats" => Ok(Self::Stats),
            "/export" => Ok(Self::Export),
            "/help" => Ok(Self::Help),
            "/quit" => Ok(Self::Quit),
            _ => Err("unknown command"),
        }
    }

    // consumes the command
    fn run(self, app: &mut App) -> anyhow::Result<Reply> {
        let text = match self {
            Self::Restaurant(action) => action.run(app),
            Self::User(name) => {
                let user = app.resolve_user(&name)?;
                app.select_user(user);
                format!("Rating as {}", app.user_name(user))
            }
            Self::Select(name) => {
                app.select_restaurant(&name)?;
                render::draft(app)
            }
            Self::Score(category, value) => {
                app.set_category_score(category, value)?;
                format!("{category}: {value}, average {}", app.live_average())
            }
            Self::Draft => render::draft(app),
            Self::Save => match app.commit_draft()? {
                Some(_) => "Rating saved successfully!".to_string(),
                None => "Choose a restaurant first.".to_string(),
            },
            Self::Cancel => {
                app.cancel_draft();
                render::draft(app)
            }
            Self::Rank(target) => {
                if target.eq_ignore_ascii_case("all") {
                    render::overall_ranking(app)
                } else {
                    let user = app.resolve_user(&target)?;
                    render::user_ranking(app, user)
                }
            }
            Self::Stats => render::stats(app),
            Self::Export => serde_json::to_string_pretty(&app.snapshot())
                .context("fail to serialize snapshot")?,
            Self::Help => HELP.to_string(),
            Self::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Text(text))
    }
}

pub(super) fn handle_line(app: &mut App, line: &str) -> Reply {
    let arguments = line.split_whitespace().collect::<Vec<_>>();
    if arguments.is_empty() {
        return Reply::Silent;
    }

    let command = match Command::new(&arguments) {
        Ok(command) => command,
        Err(hint) => return Reply::Text(format!("{hint}\n\n{HELP}")),
    };

    match command.run(app) {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!("command {} failed: {e}", arguments[0]);
            Reply::Text(format!("Fail to take action: {e}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restaurant_ranking::{AppConfigBuilder, User};

    fn app() -> App {
        let config = AppConfigBuilder::default()
            .restaurants(vec!["Evelia".to_string(), "Tony wu".to_string()])
            .build()
            .unwrap();
        App::new(config)
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(text) => text,
            Reply::Silent => String::new(),
            Reply::Quit => "<quit>".to_string(),
        }
    }

    #[test]
    fn add_restaurant_with_spaces() {
        let mut app = app();
        let out = text(handle_line(&mut app, "/restaurant add Ajo negro"));
        assert_eq!(out, "Restaurant added successfully!");
        assert_eq!(app.restaurant_list().last().unwrap(), "Ajo negro");

        let out = text(handle_line(&mut app, "/restaurant add Ajo negro"));
        assert!(out.contains("already"));
        assert_eq!(app.total_count(), 3);
    }

    #[test]
    fn full_rating_flow() {
        let mut app = app();
        text(handle_line(&mut app, "/user ramiro"));
        text(handle_line(&mut app, "/select Tony wu"));
        text(handle_line(&mut app, "/score main 5"));
        text(handle_line(&mut app, "/score dessert 3"));
        let out = text(handle_line(&mut app, "/save"));
        assert_eq!(out, "Rating saved successfully!");

        let rating = app.rating("Tony wu", User::B).unwrap();
        assert_eq!(rating.average().to_string(), "3.0");
        assert!(!app.can_commit());

        let out = text(handle_line(&mut app, "/rank ramiro"));
        assert!(out.contains("Tony wu"));
        let out = text(handle_line(&mut app, "/rank pamolita"));
        assert!(out.contains("No ratings yet"));
    }

    #[test]
    fn select_seeded_name_with_runs_of_spaces() {
        let config = AppConfigBuilder::default()
            .restaurants(vec!["Tony  wu".to_string()])
            .build()
            .unwrap();
        let mut app = App::new(config);
        let out = text(handle_line(&mut app, "/select Tony   wu"));
        assert!(out.contains("Restaurant: Tony wu"));
        assert!(app.can_commit());
    }

    #[test]
    fn save_without_restaurant_is_reported() {
        let mut app = app();
        let out = text(handle_line(&mut app, "/save"));
        assert_eq!(out, "Choose a restaurant first.");
        assert_eq!(app.rated_count(), 0);
    }

    #[test]
    fn bad_input_gets_a_hint() {
        let mut app = app();
        assert!(text(handle_line(&mut app, "/score main five")).starts_with("Can not parse"));
        assert!(text(handle_line(&mut app, "/score main 7")).starts_with("Fail to take action"));
        assert!(text(handle_line(&mut app, "/select Nowhere")).starts_with("Fail to take action"));
        assert!(text(handle_line(&mut app, "/dance")).starts_with("unknown command"));
    }

    #[test]
    fn blank_lines_and_quit() {
        let mut app = app();
        assert!(matches!(handle_line(&mut app, "   "), Reply::Silent));
        assert!(matches!(handle_line(&mut app, "/quit"), Reply::Quit));
    }

    #[test]
    fn export_is_json() {
        let mut app = app();
        let out = text(handle_line(&mut app, "/export"));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["total_count"], 2);
    }
}
