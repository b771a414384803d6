//! `hrdesk invite`, `hrdesk birthday`, `hrdesk link` - compose messages and deep links.

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, ValueEnum};
use hrdesk_io::store::load_roster;
use hrdesk_messaging::{birthday_greeting, interview_invitation, BirthdayStyle};
use hrdesk_recon::RecordKey;
use serde::Serialize;

use crate::exit_codes::EXIT_NOT_FOUND;
use crate::{print_json, CliError, Context};

#[derive(Args)]
pub struct InviteArgs {
    /// Candidate's name
    #[arg(long)]
    name: String,

    /// Candidate's mobile number, any formatting
    #[arg(long)]
    phone: String,

    /// Interview date (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,

    /// Interview time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    time: NaiveTime,

    /// Output JSON instead of the message and link
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct BirthdayArgs {
    /// Employee name as it appears in `hrdesk roster list`
    #[arg(long)]
    employee: String,

    /// Phone of the employee, when several share the name
    #[arg(long)]
    phone: Option<String>,

    /// Greeting style (default: "birthday.defaultStyle" from settings)
    #[arg(long, value_enum)]
    style: Option<StyleArg>,

    /// Video link to include (default: "birthday.videoLink" from settings)
    #[arg(long)]
    video: Option<String>,

    /// Output JSON instead of the message and link
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct LinkArgs {
    #[arg(long)]
    phone: String,

    #[arg(long)]
    message: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Formal,
    Casual,
}

impl From<StyleArg> for BirthdayStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Formal => BirthdayStyle::Formal,
            StyleArg::Casual => BirthdayStyle::Casual,
        }
    }
}

#[derive(Serialize)]
struct ComposedMessage<'a> {
    recipient: &'a str,
    phone: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<String>,
    message: &'a str,
    link: &'a str,
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("invalid time '{s}' (expected HH:MM)"))
}

fn emit(composed: &ComposedMessage<'_>, json: bool) -> Result<(), CliError> {
    if json {
        return print_json(composed);
    }
    println!("{}", composed.message);
    println!();
    println!("{}", composed.link);
    Ok(())
}

pub fn cmd_invite(ctx: &Context, args: InviteArgs) -> Result<(), CliError> {
    let name = args.name.trim();
    if name.is_empty() {
        return Err(CliError::args("candidate name is empty"));
    }

    let message = interview_invitation(name, args.date, args.time, &ctx.settings.office);
    let link = ctx.settings.link.build(&args.phone, &message);
    log::info!("invitation for {name} on {}", args.date);

    emit(
        &ComposedMessage {
            recipient: name,
            phone: &args.phone,
            style: None,
            message: &message,
            link: &link,
        },
        args.json,
    )
}

pub fn cmd_birthday(ctx: &Context, args: BirthdayArgs) -> Result<(), CliError> {
    let roster = load_roster(&ctx.store)?;
    if roster.is_empty() {
        return Err(CliError::new(EXIT_NOT_FOUND, "the roster is empty")
            .with_hint("add employees with `hrdesk roster add` or `hrdesk roster import`"));
    }

    let employee = match &args.phone {
        Some(phone) => roster.get(&RecordKey {
            full_name: args.employee.clone(),
            phone_number: phone.clone(),
        }),
        None => roster.find_by_name(&args.employee),
    };
    let Some(employee) = employee else {
        return Err(CliError::new(EXIT_NOT_FOUND, format!("no employee named '{}'", args.employee))
            .with_hint("run `hrdesk roster list` to see the names on file"));
    };

    let style = args
        .style
        .map(BirthdayStyle::from)
        .unwrap_or(ctx.settings.default_birthday_style);
    let video = args.video.as_deref().or(ctx.settings.video_link.as_deref());

    let message = birthday_greeting(&employee.full_name, style, video, &ctx.settings.office);
    let link = ctx.settings.link.build(&employee.phone_number, &message);
    log::info!("{style} birthday greeting for {}", employee.full_name);

    emit(
        &ComposedMessage {
            recipient: &employee.full_name,
            phone: &employee.phone_number,
            style: Some(style.to_string()),
            message: &message,
            link: &link,
        },
        args.json,
    )
}

pub fn cmd_link(ctx: &Context, args: LinkArgs) -> Result<(), CliError> {
    println!("{}", ctx.settings.link.build(&args.phone, &args.message));
    Ok(())
}
