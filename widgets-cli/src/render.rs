use chrono::{Datelike, Weekday};
use widgets_core::{
    DailySummary, GameStatus, IconSize, PanelView, RecentCities, WeatherReport, icon_url,
};

pub fn game_status(status: GameStatus) -> String {
    match status {
        GameStatus::InProgress { next } => format!("Next: {next}"),
        GameStatus::Won(marker) => format!("Winner: {marker}"),
        GameStatus::Draw => "Draw".to_string(),
    }
}

pub fn view(view: &PanelView) -> String {
    match view {
        PanelView::Idle => String::new(),
        PanelView::Loading => "불러오는 중...".to_string(),
        PanelView::Ready(report) => self::report(report),
        PanelView::Failed(err) => err.user_message().to_string(),
    }
}

pub fn recent(recent: &RecentCities) -> Option<String> {
    if recent.is_empty() {
        return None;
    }
    let names: Vec<&str> = recent.iter().collect();
    Some(format!("최근 검색: {}", names.join(" · ")))
}

pub fn report(report: &WeatherReport) -> String {
    let s = &report.snapshot;
    let mut lines = vec![
        format!(
            "{}, {}  ({})",
            s.location_name,
            s.country,
            report.local_time(s.observed_at).format("%Y-%m-%d %H:%M")
        ),
        format!(
            "  날씨: {}  온도: {}°C (체감 {}°C)  최저 {}°C / 최고 {}°C",
            s.description,
            celsius(s.temperature_c),
            celsius(s.feels_like_c),
            celsius(s.temp_min_c),
            celsius(s.temp_max_c),
        ),
    ];

    let mut details = format!(
        "  습도: {}%  기압: {} hPa  풍속: {} m/s",
        s.humidity_pct, s.pressure_hpa, s.wind_speed_mps
    );
    if let Some(visibility) = s.visibility_m {
        details.push_str(&format!("  가시거리: {:.1} km", f64::from(visibility) / 1000.0));
    }
    lines.push(details);

    if let (Some(sunrise), Some(sunset)) = (s.sunrise, s.sunset) {
        lines.push(format!(
            "  일출: {}  일몰: {}",
            report.local_time(sunrise).format("%H:%M"),
            report.local_time(sunset).format("%H:%M"),
        ));
    }
    if !s.icon.is_empty() {
        lines.push(format!("  {}", icon_url(&s.icon, IconSize::Large)));
    }

    if !report.daily.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}일 예보", report.daily.len()));
        lines.extend(report.daily.iter().map(daily));
    }

    lines.join("\n")
}

fn daily(day: &DailySummary) -> String {
    let mut line = format!(
        "  {} ({})  {}°C / {}°C  {}",
        day.date.format("%m-%d"),
        weekday_ko(day.date.weekday()),
        celsius(day.temp_min_c),
        celsius(day.temp_max_c),
        day.description,
    );
    if !day.icon.is_empty() {
        line.push_str(&format!("  {}", icon_url(&day.icon, IconSize::Small)));
    }
    line
}

fn weekday_ko(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "월",
        Weekday::Tue => "화",
        Weekday::Wed => "수",
        Weekday::Thu => "목",
        Weekday::Fri => "금",
        Weekday::Sat => "토",
        Weekday::Sun => "일",
    }
}

/// Whole degrees, rounded half away from zero, never "-0".
fn celsius(value: f64) -> String {
    let rounded = value.round();
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate};
    use widgets_core::{Marker, WeatherError, WeatherSnapshot};

    fn sample_report() -> WeatherReport {
        let snapshot = WeatherSnapshot {
            location_name: "Seoul".into(),
            country: "KR".into(),
            observed_at: DateTime::from_timestamp(1_714_536_000, 0).unwrap(),
            utc_offset_secs: 9 * 3600,
            temperature_c: 18.5,
            feels_like_c: -0.3,
            temp_min_c: 16.0,
            temp_max_c: 20.1,
            humidity_pct: 48,
            pressure_hpa: 1012,
            visibility_m: Some(10_000),
            wind_speed_mps: 2.57,
            description: "맑음".into(),
            icon: "01d".into(),
            sunrise: DateTime::from_timestamp(1_714_509_000, 0),
            sunset: DateTime::from_timestamp(1_714_558_800, 0),
        };
        WeatherReport {
            snapshot,
            daily: vec![DailySummary {
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                temp_min_c: 12.0,
                temp_max_c: 18.0,
                description: "구름조금".into(),
                icon: "02d".into(),
            }],
        }
    }

    #[test]
    fn status_lines() {
        assert_eq!(game_status(GameStatus::InProgress { next: Marker::X }), "Next: X");
        assert_eq!(game_status(GameStatus::Won(Marker::O)), "Winner: O");
        assert_eq!(game_status(GameStatus::Draw), "Draw");
    }

    #[test]
    fn report_uses_location_time_and_icons() {
        let text = report(&sample_report());

        assert!(text.starts_with("Seoul, KR  (2024-05-01 13:00)"));
        assert!(text.contains("온도: 19°C (체감 0°C)"));
        assert!(text.contains("가시거리: 10.0 km"));
        assert!(text.contains("일출: 05:30"));
        assert!(text.contains("https://openweathermap.org/img/wn/01d@2x.png"));
        assert!(text.contains("05-01 (수)  12°C / 18°C  구름조금"));
        assert!(text.contains("https://openweathermap.org/img/wn/02d.png"));
    }

    #[test]
    fn failed_view_shows_inline_message() {
        let text = view(&PanelView::Failed(WeatherError::LocationNotFound));
        assert_eq!(text, "도시를 찾을 수 없습니다. 다시 입력해주세요.");
    }

    #[test]
    fn recent_line_is_hidden_when_empty() {
        assert_eq!(recent(&RecentCities::new()), None);
        let list = RecentCities::new().record_search("Busan").record_search("Seoul");
        assert_eq!(recent(&list).as_deref(), Some("최근 검색: Seoul · Busan"));
    }
}
