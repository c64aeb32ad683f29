//! Calendar day and lunar month checks at New Delhi.

use jyoti_core::{AnalyticSource, ErrorKind, GeoLocation};
use jyoti_search::{
    CalendarVariant, MonthScheme, SearchContext, builtin_festivals, calendar_day,
    lunations_between, masa_at,
};
use jyoti_time::{CivilDate, Weekday, calendar_to_jd};
use jyoti_vedic_base::{AyanamshaSystem, Graha, Masa, Paksha, Tithi};

fn delhi() -> GeoLocation {
    GeoLocation::new(28.6139, 77.2090, 0.0)
}

#[test]
fn ugadi_2024_day() {
    let src = AnalyticSource::default();
    let ctx = SearchContext::new(&src, AyanamshaSystem::Lahiri);
    let date = CivilDate::new(2024, 4, 9).unwrap();
    let day = calendar_day(
        &ctx,
        date,
        &delhi(),
        &CalendarVariant::amanta(),
        &builtin_festivals(),
    )
    .unwrap();

    assert_eq!(day.weekday, Weekday::Tuesday);
    assert_eq!(day.vaara_lord(), Graha::Mangal);
    assert_eq!(day.tithi.tithi, Tithi::Pratipada);
    assert_eq!(day.paksha(), Paksha::Shukla);
    assert_eq!(day.masa.masa, Masa::Chaitra);
    assert!(!day.masa.adhika);
    assert!(day.festivals.iter().any(|f| f == "Ugadi"), "{:?}", day.festivals);

    assert!(day.sunrise_jd < day.sunset_jd);
    assert!(day.tithi.end_jd.unwrap() > day.sunrise_jd);
    assert!(day.nakshatra.end_jd.unwrap() > day.sunrise_jd);
    assert!(day.yoga.end_jd.unwrap() > day.sunrise_jd);
    assert!(day.karana.end_jd.unwrap() > day.sunrise_jd);
    assert!(day.masa.lunation_start_jd < day.sunrise_jd);
    assert!(day.masa.lunation_end_jd > day.sunrise_jd);

    let w = &day.windows;
    for window in [w.rahu_kalam, w.yamaganda, w.gulika, w.abhijit] {
        assert!(window.is_within(&w.daytime));
    }
    // Tuesday: 7th eighth of the day
    let eighth = (day.sunset_jd - day.sunrise_jd) / 8.0;
    assert!((w.rahu_kalam.start_jd - (day.sunrise_jd + 6.0 * eighth)).abs() < 1e-9);
}

#[test]
fn purnimanta_day_in_krishna_paksha() {
    let src = AnalyticSource::default();
    let ctx = SearchContext::new(&src, AyanamshaSystem::Lahiri);
    let date = CivilDate::new(2024, 4, 28).unwrap();
    let day = calendar_day(&ctx, date, &delhi(), &CalendarVariant::purnimanta(), &[]).unwrap();
    assert_eq!(day.paksha(), Paksha::Krishna);
    assert_eq!(day.masa.scheme, MonthScheme::Purnimanta);
    assert_eq!(day.masa.amanta, Masa::Chaitra);
    assert_eq!(day.masa.masa, Masa::Vaishakha);
    assert!(day.festivals.is_empty());
}

#[test]
fn month_names_through_the_year() {
    let src = AnalyticSource::default();
    let ctx = SearchContext::new(&src, AyanamshaSystem::Lahiri);
    let at = |y, m, d: f64| {
        masa_at(&ctx, calendar_to_jd(y, m, d), MonthScheme::Amanta).unwrap()
    };
    assert_eq!(at(2024, 1, 15.5).masa, Masa::Pausha);
    assert_eq!(at(2024, 4, 15.5).masa, Masa::Chaitra);
    assert_eq!(at(2024, 10, 10.5).masa, Masa::Ashwin);

    // 2023 carried an adhika Shravana (2023-07-17 to 2023-08-16)
    let adhika = at(2023, 8, 1.5);
    assert!(adhika.adhika);
    assert_eq!(adhika.masa, Masa::Shravana);
    let nija = at(2023, 8, 25.5);
    assert!(!nija.adhika);
    assert_eq!(nija.masa, Masa::Shravana);
}

#[test]
fn lunations_are_contiguous() {
    let src = AnalyticSource::default();
    let ctx = SearchContext::new(&src, AyanamshaSystem::Lahiri);
    let start = calendar_to_jd(2023, 1, 1.0);
    let end = calendar_to_jd(2024, 1, 1.0);
    let lunations = lunations_between(&ctx, start, end).unwrap();
    assert!(lunations[0].start_jd <= start);
    assert!(lunations.last().unwrap().end_jd > end);
    for w in lunations.windows(2) {
        assert_eq!(w[0].end_jd, w[1].start_jd);
    }
    assert_eq!(lunations.iter().filter(|l| l.adhika).count(), 1);
}

#[test]
fn polar_night_has_no_panchang() {
    let src = AnalyticSource::default();
    let ctx = SearchContext::new(&src, AyanamshaSystem::Lahiri);
    let tromso = GeoLocation::new(69.6492, 18.9553, 0.0);
    let date = CivilDate::new(2024, 12, 21).unwrap();
    let err = calendar_day(&ctx, date, &tromso, &CalendarVariant::amanta(), &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PolarUndefined);
}

#[test]
fn invalid_location_is_validation() {
    let src = AnalyticSource::default();
    let ctx = SearchContext::new(&src, AyanamshaSystem::Lahiri);
    let bad = GeoLocation::new(95.0, 0.0, 0.0);
    let date = CivilDate::new(2024, 1, 1).unwrap();
    let err = calendar_day(&ctx, date, &bad, &CalendarVariant::amanta(), &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}
