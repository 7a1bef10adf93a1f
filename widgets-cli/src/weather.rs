use anyhow::{Result, bail};
use inquire::{
    CustomUserError, InquireError, Text,
    autocompletion::{Autocomplete, Replacement},
};
use widgets_core::{Geolocator, LookupOutcome, PanelView, WeatherPanel, WeatherProvider};

use crate::render;

const HERE_COMMAND: &str = ":here";
const QUIT_COMMANDS: [&str; 2] = [":q", ":quit"];
const CANCELLED_MESSAGE: &str = "조회를 취소했습니다.";

#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    City(String),
    Here,
}

impl Target {
    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case(HERE_COMMAND) {
            Some(Target::Here)
        } else if input.is_empty() {
            None
        } else {
            Some(Target::City(input.to_string()))
        }
    }
}

fn help_line() -> String {
    format!("도시 이름을 입력하세요. {HERE_COMMAND} 현재 위치, 조회 중 Ctrl-C 취소, :q 종료")
}

/// Resolves on Ctrl-C. Never resolves if the signal handler cannot be installed.
async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

async fn lookup<P, G>(
    panel: &mut WeatherPanel,
    provider: &P,
    geolocator: &G,
    target: Target,
) -> LookupOutcome
where
    P: WeatherProvider + ?Sized,
    G: Geolocator + ?Sized,
{
    match target {
        Target::City(name) => panel.search(provider, &name, interrupted()).await,
        Target::Here => panel.search_here(provider, geolocator, interrupted()).await,
    }
}

pub async fn show_once<P, G>(provider: &P, geolocator: &G, target: Target) -> Result<()>
where
    P: WeatherProvider + ?Sized,
    G: Geolocator + ?Sized,
{
    let mut panel = WeatherPanel::new();
    if lookup(&mut panel, provider, geolocator, target).await == LookupOutcome::Cancelled {
        eprintln!("{CANCELLED_MESSAGE}");
        return Ok(());
    }

    match panel.view() {
        PanelView::Ready(report) => {
            println!("{}", render::report(report));
            Ok(())
        }
        PanelView::Failed(err) => bail!("{} ({err})", err.user_message()),
        PanelView::Idle | PanelView::Loading => bail!("Nothing to look up"),
    }
}

pub async fn run_panel<P, G>(provider: &P, geolocator: &G, initial_city: &str) -> Result<()>
where
    P: WeatherProvider + ?Sized,
    G: Geolocator + ?Sized,
{
    println!("날씨 앱");
    println!("{}\n", help_line());

    let mut panel = WeatherPanel::new();
    let mut next = Target::parse(initial_city);

    loop {
        if let Some(target) = next.take() {
            if lookup(&mut panel, provider, geolocator, target).await == LookupOutcome::Cancelled {
                println!("{CANCELLED_MESSAGE}\n");
            }
            let rendered = render::view(panel.view());
            if !rendered.is_empty() {
                println!("{rendered}\n");
            }
        }

        let help = render::recent(panel.recent());
        let mut prompt = Text::new("도시:")
            .with_placeholder("예: Seoul")
            .with_autocomplete(RecentSuggester(panel.recent().as_slice().to_vec()));
        if let Some(help) = help.as_deref() {
            prompt = prompt.with_help_message(help);
        }

        let input = match prompt.prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        if QUIT_COMMANDS.contains(&input.trim()) {
            break;
        }
        next = Target::parse(&input);
    }

    panel.close();
    Ok(())
}

/// Suggests recent cities whose name starts with the typed text.
#[derive(Debug, Clone)]
struct RecentSuggester(Vec<String>);

impl Autocomplete for RecentSuggester {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        let needle = input.trim().to_lowercase();
        Ok(self
            .0
            .iter()
            .filter(|name| name.to_lowercase().starts_with(&needle))
            .cloned()
            .collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_targets() {
        assert_eq!(Target::parse(" Seoul "), Some(Target::City("Seoul".into())));
        assert_eq!(Target::parse(":HERE"), Some(Target::Here));
        assert_eq!(Target::parse("   "), None);
    }

    #[test]
    fn suggester_filters_by_prefix() {
        let mut suggester = RecentSuggester(vec!["Seoul".into(), "Busan".into(), "Sejong".into()]);
        assert_eq!(suggester.get_suggestions("se").unwrap(), ["Seoul", "Sejong"]);
        assert_eq!(suggester.get_suggestions("").unwrap().len(), 3);
    }

    #[test]
    fn help_line_lists_cancel_and_quit() {
        let help = help_line();
        assert!(help.contains(HERE_COMMAND));
        assert!(help.contains("조회 중 Ctrl-C 취소"));
        assert!(help.contains(":q 종료"));
    }
}
