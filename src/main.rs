use std::path::PathBuf;

use clap::Parser;
use dialoguer::Input;

use kebiao::{export, schedule, session};

#[derive(Parser)]
#[clap(version, about, long_about = None)]
struct Args {
    /// Cookie file exported from a logged-in browser session
    #[clap(short, long, value_name = "FILE", default_value = "cookies.json")]
    cookies: PathBuf,

    /// Parse a saved course table page instead of fetching it
    #[clap(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Course table URL, for portals hosted elsewhere
    #[clap(short, long, value_name = "URL")]
    url: Option<String>,

    /// Where to write the extracted records
    #[clap(short, long, value_name = "FILE", default_value = "course_schedule.csv")]
    output: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let user_agent = format!("kebiao/{}", env!("CARGO_PKG_VERSION"));

    let document = match &args.input {
        Some(path) => session::from_file(path).expect("Can't read the saved page."),
        None => {
            let session = match session::Session::from_cookie_file(&args.cookies, &user_agent) {
                Ok(session) => session,
                Err(err) => {
                    println!("Cookie file {} unusable: {err}", args.cookies.display());
                    let header: String = Input::new()
                        .with_prompt("Paste the Cookie header of a logged-in portal tab")
                        .interact_text()
                        .unwrap();
                    session::Session::from_header(&header, &user_agent)
                        .expect("Can't build the session.")
                }
            };

            let url = args.url.as_deref().unwrap_or(session::COURSE_TABLE_URL);
            println!("Fetching the course table...");
            session
                .course_table(url)
                .await
                .expect("Can't reach the course table page.")
        }
    };

    let grid = schedule::build(&document);
    let courses = schedule::collect(&grid);
    println!(
        "Extracted {} course records over {} time slots",
        courses.len(),
        grid.slots.len()
    );

    export::write(&courses, &args.output).expect("Can't write the output file.");
    println!("Records written to {}", args.output.display());
}
