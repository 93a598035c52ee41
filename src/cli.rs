use clap::{CommandFactory, Parser};

use crate::youtube::SearchOrder;

#[derive(Parser, Debug)]
#[command(name = "yt-views")]
#[command(about = "List a YouTube channel's videos with their view counts as CSV")]
#[command(version)]
pub struct Cli {
    /// YouTube channel ID
    #[arg(short, long)]
    pub channel: Option<String>,

    /// Published before time, e.g. 2019-12-04T00:00:00Z
    #[arg(short, long)]
    pub before: Option<String>,

    /// Published after time, e.g. 2019-12-03T00:00:00Z
    #[arg(short, long)]
    pub after: Option<String>,

    /// Ordering requested from the search API
    #[arg(long, value_enum, default_value_t = SearchOrder::ViewCount)]
    pub order: SearchOrder,

    /// Re-sort rows by the fetched view counts (highest first)
    #[arg(long)]
    pub sort_by_views: bool,

    /// Environment variable holding the API key
    #[arg(long, default_value = "YOUTUBE_APIKEY")]
    pub key_env: String,
}

/// Rewrites Go-style single-dash long flags (`-channel`) into `--channel`.
///
/// Only names declared as long flags are rewritten, so short flags with an
/// attached value (`-cUC123`) and anything after `--` are left alone.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let command = Cli::command();
    let long_flags: Vec<&str> = command.get_arguments().filter_map(|arg| arg.get_long()).collect();

    let mut passthrough = false;
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 || passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }
            let is_single_dash_long = arg
                .strip_prefix('-')
                .filter(|rest| !rest.starts_with('-'))
                .and_then(|rest| rest.split('=').next())
                .is_some_and(|name| long_flags.contains(&name));
            if is_single_dash_long {
                format!("-{}", arg)
            } else {
                arg
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalizes_go_style_flags() {
        let out = normalize_args(args(&[
            "yt-views",
            "-channel",
            "UC123",
            "-before=2019-12-04T00:00:00Z",
            "-after",
            "2019-12-03T00:00:00Z",
        ]));
        assert_eq!(
            out,
            args(&[
                "yt-views",
                "--channel",
                "UC123",
                "--before=2019-12-04T00:00:00Z",
                "--after",
                "2019-12-03T00:00:00Z",
            ])
        );
    }

    #[test]
    fn leaves_short_and_double_dash_flags() {
        let input = args(&["yt-views", "-c", "UC123", "--after", "x", "--", "-weird"]);
        assert_eq!(normalize_args(input.clone()), input);
    }

    #[test]
    fn keeps_short_flags_with_attached_values() {
        let input = args(&["yt-views", "-cUC123", "-b2019-12-04T00:00:00Z"]);
        assert_eq!(normalize_args(input.clone()), input);

        let cli = Cli::try_parse_from(normalize_args(input)).unwrap();
        assert_eq!(cli.channel.as_deref(), Some("UC123"));
        assert_eq!(cli.before.as_deref(), Some("2019-12-04T00:00:00Z"));
    }

    #[test]
    fn rewrites_every_declared_long_flag() {
        let out = normalize_args(args(&["yt-views", "-sort-by-views", "-key-env=APIKEY"]));
        assert_eq!(out, args(&["yt-views", "--sort-by-views", "--key-env=APIKEY"]));
    }

    #[test]
    fn parses_normalized_flags() {
        let cli = Cli::try_parse_from(normalize_args(args(&[
            "yt-views", "-channel", "UC123", "-order", "date",
        ])))
        .unwrap();
        assert_eq!(cli.channel.as_deref(), Some("UC123"));
        assert_eq!(cli.order, SearchOrder::Date);
        assert!(!cli.sort_by_views);
        assert_eq!(cli.key_env, "YOUTUBE_APIKEY");
    }

    #[test]
    fn channel_is_optional_at_parse_time() {
        let cli = Cli::try_parse_from(args(&["yt-views"])).unwrap();
        assert!(cli.channel.is_none());
        assert_eq!(cli.order, SearchOrder::ViewCount);
    }
}
