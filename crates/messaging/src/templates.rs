// Message bodies for interview invitations and birthday greetings

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Sender and office details that appear in every message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfficeProfile {
    /// First name of the person sending the messages
    pub sender_name: String,
    /// Office name as used in "from the office of ..."
    pub office_name: String,
    /// Sign-off used in greetings
    pub signature: String,
    pub address: String,
    pub floor: String,
}

impl Default for OfficeProfile {
    fn default() -> Self {
        Self {
            sender_name: "תאיר".to_string(),
            office_name: "עורכי דין י.שפירא".to_string(),
            signature: "משרד י.שפירא ושות' עורכי דין".to_string(),
            address: "נירים 4 תל אביב".to_string(),
            floor: "2".to_string(),
        }
    }
}

/// Short Hebrew weekday name.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "א'",
        Weekday::Mon => "ב'",
        Weekday::Tue => "ג'",
        Weekday::Wed => "ד'",
        Weekday::Thu => "ה'",
        Weekday::Fri => "ו'",
        Weekday::Sat => "שבת",
    }
}

/// Invitation to a job interview at the office.
pub fn interview_invitation(
    candidate_name: &str,
    date: NaiveDate,
    time: NaiveTime,
    office: &OfficeProfile,
) -> String {
    format!(
        "היי {candidate_name}, זאת {sender} ממשרד {office_name}.\n\
         בהמשך לשיחתנו נקבע ראיון עבודה ליום {day} בתאריך ה-{date} בשעה {time}.\n\
         כתובתנו {address}. אני יושבת בקומה ה-{floor}.\n\
         \n\
         לכל שאלה אני זמינה במספר הזה, אנא אשר/י את קבלת ההודעה.",
        sender = office.sender_name,
        office_name = office.office_name,
        day = weekday_label(date),
        date = date.format("%d/%m"),
        time = time.format("%H:%M"),
        address = office.address,
        floor = office.floor,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BirthdayStyle {
    /// Warm and formal
    #[default]
    Formal,
    /// Light and familial
    Casual,
}

impl std::fmt::Display for BirthdayStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Formal => write!(f, "formal"),
            Self::Casual => write!(f, "casual"),
        }
    }
}

/// Birthday greeting for an employee. A non-empty `video_link` adds a line pointing to it.
pub fn birthday_greeting(
    name: &str,
    style: BirthdayStyle,
    video_link: Option<&str>,
    office: &OfficeProfile,
) -> String {
    let video = match video_link.map(str::trim) {
        Some(link) if !link.is_empty() => format!("\n\n🎬 הכנו לך משהו קטן: {link}"),
        _ => String::new(),
    };
    let signature = &office.signature;

    match style {
        BirthdayStyle::Formal => format!(
            "מזל טוב {name}! 🎉\n\
             יום הולדת שמח! מאחלים לך שנה של צמיחה, הצלחות והמון רגעים מאושרים.\n\
             שמחים שאת/ה חלק מהצוות שלנו.\n\
             \n\
             אוהבים {signature}{video}"
        ),
        BirthdayStyle::Casual => format!(
            "היי {name}, המון מזל טוב ליום ההולדת! 🎂\n\
             שתהיה שנה מדהימה, מלאה בכיף ובשורות טובות.\n\
             \n\
             אוהבים {signature}{video}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_labels() {
        // 2026-10-18 is a Sunday
        let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let labels: Vec<_> = (0..7)
            .map(|i| weekday_label(sunday + chrono::Duration::days(i)))
            .collect();
        assert_eq!(labels, vec!["א'", "ב'", "ג'", "ד'", "ה'", "ו'", "שבת"]);
    }

    #[test]
    fn interview_invitation_fields() {
        let msg = interview_invitation(
            "Dana",
            NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            NaiveTime::from_hms_opt(9, 5, 0).unwrap(),
            &OfficeProfile::default(),
        );
        let lines: Vec<&str> = msg.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "היי Dana, זאת תאיר ממשרד עורכי דין י.שפירא.");
        assert_eq!(lines[1], "בהמשך לשיחתנו נקבע ראיון עבודה ליום ג' בתאריך ה-20/10 בשעה 09:05.");
        assert_eq!(lines[2], "כתובתנו נירים 4 תל אביב. אני יושבת בקומה ה-2.");
        assert_eq!(lines[3], "");
    }

    #[test]
    fn birthday_with_and_without_video() {
        let office = OfficeProfile::default();
        let plain = birthday_greeting("Avi", BirthdayStyle::Casual, None, &office);
        assert!(plain.starts_with("היי Avi, המון מזל טוב"));
        assert!(plain.ends_with("אוהבים משרד י.שפירא ושות' עורכי דין"));

        let blank = birthday_greeting("Avi", BirthdayStyle::Casual, Some("  "), &office);
        assert_eq!(blank, plain);

        let video = birthday_greeting("Avi", BirthdayStyle::Formal, Some("https://youtu.be/abc"), &office);
        assert!(video.starts_with("מזל טוב Avi! 🎉\n"));
        assert!(video.ends_with("\n\n🎬 הכנו לך משהו קטן: https://youtu.be/abc"));
    }
}
