// Behaviour of the public /meet command parser.
use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use slashmeet::{CommandAction, MeetingIntent, ParseError, parse_meeting_command};

const UTC: &str = "Etc/UTC";

fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 7, 19, 14, 0, 0).unwrap()
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 7, 19, hour, minute, 0).unwrap()
}

fn parse(input: &str) -> MeetingIntent {
    parse_meeting_command(input, reference(), UTC).unwrap()
}

#[test]
fn test_meeting_names() {
    let names = [
        "3amigos",
        "mymeeting",
        "mymeeting123",
        "my_meeting123",
        "my-meeting123",
        "pleaseattend123!",
        "please_attend123!",
        "please-attend123!",
        "attending123?",
        "attending_anyone123?",
        "attending-anyone123?",
        "\"my test meeting 123\"",
        "\"10 amigos? -_- shouldn't it be 3 amigos!?\"",
        "1couldn't!?",
        "/meet",
    ];

    for input in names {
        let intent = parse(input);
        assert_eq!(intent.name, input.replace('"', ""), "name for {}", input);
        assert_eq!(intent.start, reference());
        assert_eq!(intent.end, reference() + Duration::hours(1));
        assert!(intent.is_now);
        assert!(!intent.no_calendar);
        assert!(!intent.is_login);
        assert!(!intent.is_logout);
    }
}

#[test]
fn test_no_time_tokens_defaults_to_now_for_an_hour() {
    let odd_reference = Utc
        .with_ymd_and_hms(2023, 7, 19, 14, 7, 42)
        .unwrap()
        .with_nanosecond(500_000_000)
        .unwrap();
    let intent = parse_meeting_command("foo nocal", odd_reference, UTC).unwrap();

    assert_eq!(intent.start, at(14, 7));
    assert_eq!(intent.end, at(15, 7));
    assert!(intent.is_now);
    assert!(intent.no_calendar);
}

#[test]
fn test_duration_only() {
    let intent = parse("foo 25m");
    assert_eq!(intent.name, "foo");
    assert_eq!(intent.start, reference());
    assert_eq!(intent.end, intent.start + Duration::minutes(25));
    assert!(intent.is_now);

    let intent = parse("foo 1h");
    assert_eq!(intent.end, intent.start + Duration::hours(1));

    let intent = parse("foo 3h");
    assert_eq!(intent.end, intent.start + Duration::minutes(180));
}

#[test]
fn test_twenty_four_hour_start_with_duration() {
    let intent = parse("foo 14:00 25m");
    assert_eq!(intent.start, at(14, 0));
    assert_eq!(intent.end, at(14, 25));
    assert!(!intent.is_now);
}

#[test]
fn test_twelve_and_twenty_four_hour_agree() {
    assert_eq!(parse("foo 2pm 25m").start, parse("foo 14:00 25m").start);
    assert_eq!(parse("foo 1:12pm 25m").start, parse("foo 13:12 25m").start);
}

#[test]
fn test_pm_hours() {
    assert_eq!(parse("foo 11pm 25m").start, at(23, 0));
    assert_eq!(parse("foo 1:12pm 25m").start, at(13, 12));
    assert_eq!(parse("foo 10:23pm 25m").start, at(22, 23));
    assert_eq!(parse("foo 9am").start, at(9, 0));
}

#[test]
fn test_twelve_am_is_not_special_cased() {
    // Observed behaviour kept on purpose: 12am resolves to 12:00, not 00:00.
    assert_eq!(parse("foo 12am").start, at(12, 0));
    assert_eq!(parse("foo 12pm").start, at(12, 0));
}

#[test]
fn test_start_and_finish_times() {
    let intent = parse("foo 5pm 10:23pm");
    assert_eq!(intent.start, at(17, 0));
    assert_eq!(intent.end, at(22, 23));

    let intent = parse("foo 10:23pm 11pm");
    assert_eq!(intent.start, at(22, 23));
    assert_eq!(intent.end, at(23, 0));

    let intent = parse("foo 10:23pm 11:23pm");
    assert_eq!(intent.end, at(23, 23));
}

#[test]
fn test_finish_before_start_is_kept_verbatim() {
    let intent = parse("foo 10:23pm 17:00");
    assert_eq!(intent.start, at(22, 23));
    assert_eq!(intent.end, at(17, 0));
    assert!(intent.end < intent.start);

    let intent = parse("foo 10:23pm 1:23pm");
    assert_eq!(intent.end, at(13, 23));
}

#[test]
fn test_explicit_start_without_end_lasts_an_hour() {
    let intent = parse("foo 9:30");
    assert_eq!(intent.start, at(9, 30));
    assert_eq!(intent.end, at(10, 30));
}

#[test]
fn test_now_with_duration_and_finish() {
    let intent = parse("foo now 25m");
    assert!(intent.is_now);
    assert_eq!(intent.start, reference());
    assert_eq!(intent.end, at(14, 25));

    let intent = parse("foo now 17:00");
    assert!(intent.is_now);
    assert_eq!(intent.start, reference());
    assert_eq!(intent.end, at(17, 0));
}

#[test]
fn test_quoted_name_with_times_and_nocal() {
    let intent = parse("\"team sync\" 14:00 17:00 nocal");
    assert_eq!(intent.name, "team sync");
    assert_eq!(intent.start, at(14, 0));
    assert_eq!(intent.end, at(17, 0));
    assert!(intent.no_calendar);
    assert_eq!(intent.action(), CommandAction::CreateMeeting { calendar: false });
}

#[test]
fn test_whitespace_is_flexible() {
    let intent = parse("   foo \t 2pm   25m  ");
    assert_eq!(intent.name, "foo");
    assert_eq!(intent.start, at(14, 0));
    assert_eq!(intent.end, at(14, 25));
}

#[test]
fn test_login_and_logout() {
    let login = parse("login");
    assert!(login.is_login);
    assert!(!login.is_logout);
    assert!(!login.is_now);
    assert_eq!(login.name, "");
    assert!(!login.no_calendar);
    assert_eq!(login.action(), CommandAction::Login);

    let logout = parse("logout");
    assert!(logout.is_logout);
    assert!(!logout.is_login);
    assert_eq!(logout.action(), CommandAction::Logout);
}

#[test]
fn test_time_zone_is_validated_even_for_login() {
    let err = parse_meeting_command("login", reference(), "Not/AZone").unwrap_err();
    assert_eq!(err, ParseError::UnknownTimeZone("Not/AZone".into()));
}

#[test]
fn test_empty_input_is_a_syntax_error_at_zero() {
    let err = parse_meeting_command("", reference(), UTC).unwrap_err();
    assert!(matches!(err, ParseError::Syntax { offset: 0, .. }));
}

#[test]
fn test_syntax_errors_report_offset() {
    let err = parse_meeting_command("foo bar", reference(), UTC).unwrap_err();
    assert_eq!(err.offset(), Some(4));

    for input in ["foo 2pm 25m extra", "foo 25m 14:00", "foo 2 pm", "foo nocal now"] {
        let err = parse_meeting_command(input, reference(), UTC).unwrap_err();
        assert!(err.is_syntax(), "{:?} should not parse", input);
    }
}

#[test]
fn test_out_of_range_hour_is_a_range_error() {
    let err = parse_meeting_command("foo 25:00", reference(), UTC).unwrap_err();
    assert!(err.is_range());
    assert_eq!(err.offset(), None);
    assert!(err.to_string().contains("Hour"));

    let err = parse_meeting_command("foo 10:00 10:61", reference(), UTC).unwrap_err();
    assert!(err.is_range());
    assert!(err.to_string().contains("Minute"));
}

#[test]
fn test_round_trip_wall_clock_in_zone() {
    let zones = [
        chrono_tz::America::New_York,
        chrono_tz::Europe::London,
        chrono_tz::Asia::Kolkata,
        chrono_tz::Australia::Adelaide,
        chrono_tz::Pacific::Auckland,
    ];
    for tz in zones {
        for (h, m) in [(0, 0), (7, 5), (12, 30), (18, 45), (23, 59)] {
            let input = format!("foo {}:{:02}", h, m);
            let intent = parse_meeting_command(&input, reference(), tz.name()).unwrap();
            let local = intent.start.with_timezone(&tz);
            assert_eq!((local.hour(), local.minute()), (h, m), "{} in {}", input, tz);
        }
    }
}

#[test]
fn test_parallel_calls_do_not_share_state() {
    let inputs = ["foo 2pm 25m", "bar 10:23pm 11pm", "login", "baz now 1h", "qux 9am nocal"];
    let expected: Vec<MeetingIntent> = inputs.iter().map(|i| parse(i)).collect();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            std::thread::spawn(move || {
                inputs
                    .iter()
                    .map(|i| parse_meeting_command(i, reference(), UTC).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
