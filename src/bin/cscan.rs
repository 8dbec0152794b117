use std::io::Write;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tower::filter::{FilterLayer, Predicate};
use tower::{BoxError, Service, ServiceBuilder, ServiceExt};

use cscan::services::planner::PlannerService;
use cscan::strategies::cscan::CscanStrategy;
use cscan::types::direction::Direction;
use cscan::types::plan::SchedulePlan;
use cscan::types::request::PlanRequest;
use cscan::types::track::{Track, TrackRange};

const MIN_TRACK: Track = 0;
const MAX_TRACK: Track = 199;

type Prompt = Lines<BufReader<Stdin>>;

#[derive(Clone)]
struct Validation;

impl Predicate<PlanRequest> for Validation {
    type Request = PlanRequest;

    fn check(&mut self, request: PlanRequest) -> Result<Self::Request, BoxError> {
        let valid = request.range.min <= request.range.max
            && request.range.contains(request.head)
            && request.tracks.iter().all(|&t| request.range.contains(t));
        if !valid {
            eprintln!("invalid request: {request:?}");
            return Err(BoxError::from("request outside track range"));
        }
        Ok(request)
    }
}

async fn read_line(input: &mut Prompt, prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let line = input.next_line().await?.context("input stream closed")?;
    Ok(line.trim().to_string())
}

async fn prompt_position(input: &mut Prompt) -> anyhow::Result<Track> {
    let prompt = format!("Enter initial arm position ({MIN_TRACK} - {MAX_TRACK}): ");
    loop {
        let line = read_line(input, &prompt).await?;
        match line.parse::<Track>() {
            Ok(position) if (MIN_TRACK..=MAX_TRACK).contains(&position) => return Ok(position),
            Ok(_) => println!(
                "Error: Initial arm position must be between {MIN_TRACK} and {MAX_TRACK}."
            ),
            Err(_) => println!("Invalid input. Please enter an integer."),
        }
    }
}

async fn prompt_direction(input: &mut Prompt) -> anyhow::Result<Direction> {
    loop {
        let line = read_line(input, "Enter direction (UP / DOWN): ").await?;
        match Direction::try_from(line.as_str()) {
            Ok(direction) => return Ok(direction),
            Err(_) => println!("Error: Direction must be UP or DOWN."),
        }
    }
}

async fn prompt_request_count(input: &mut Prompt) -> anyhow::Result<usize> {
    loop {
        let line = read_line(input, "Enter number of track requests: ").await?;
        match line.parse::<usize>() {
            Ok(count) if count > 0 => return Ok(count),
            Ok(_) => println!("Error: Number of requests must be positive."),
            Err(_) => println!("Invalid input. Please enter a positive integer."),
        }
    }
}

/// Collect `count` track requests: first from one whitespace-separated
/// line, then one prompt at a time for whatever is still missing. The bulk
/// line drops out-of-range values with a warning; the single prompts
/// re-ask instead.
async fn collect_requests(input: &mut Prompt, count: usize) -> anyhow::Result<Vec<Track>> {
    let mut tracks = Vec::with_capacity(count);
    println!("Enter {count} track requests ({MIN_TRACK} - {MAX_TRACK}):");

    let line = read_line(input, "").await?;
    for token in line.split_whitespace() {
        // A token that is not a number ends the scan of the bulk line.
        let Ok(value) = token.parse::<Track>() else {
            break;
        };
        if !(MIN_TRACK..=MAX_TRACK).contains(&value) {
            println!("Warning: {value} is out of range (ignored, please re-enter later).");
            continue;
        }
        tracks.push(value);
        if tracks.len() == count {
            break;
        }
    }

    while tracks.len() < count {
        let prompt = format!("Request {}: ", tracks.len() + 1);
        let line = read_line(input, &prompt).await?;
        match line.parse::<Track>() {
            Ok(value) if (MIN_TRACK..=MAX_TRACK).contains(&value) => tracks.push(value),
            Ok(_) => println!(
                "Error: Track request must be between {MIN_TRACK} and {MAX_TRACK}."
            ),
            Err(_) => println!(
                "Invalid input. Please enter an integer between {MIN_TRACK} and {MAX_TRACK}."
            ),
        }
    }
    Ok(tracks)
}

fn render_plan(position: Track, direction: Direction, plan: &SchedulePlan) {
    println!("\n=== C-SCAN Schedule ===");
    println!("Initial Arm Position: {position}");
    println!("Direction: {direction}\n");

    println!("{:<10}{:<10}{:<15}", "Start", "Finish", "Track Travelled");
    println!("{}", "=".repeat(35));
    for step in &plan.steps {
        println!("{:<10}{:<10}{:<15}", step.start, step.finish, step.distance);
    }
    println!("\nTotal Track Travelled: {}", plan.total_distance);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let range = TrackRange::new(MIN_TRACK, MAX_TRACK);

    let mut svc = ServiceBuilder::new()
        .layer(FilterLayer::new(Validation))
        .service(PlannerService::new(CscanStrategy));

    println!("=== C-SCAN Disk Scheduling Simulator (Tracks {MIN_TRACK} - {MAX_TRACK}) ===\n");

    loop {
        let head = prompt_position(&mut input).await?;
        let direction = prompt_direction(&mut input).await?;
        let count = prompt_request_count(&mut input).await?;
        let tracks = collect_requests(&mut input, count).await?;

        let mut sorted = tracks.clone();
        sorted.sort_unstable();
        let listed = sorted
            .iter()
            .map(|track| track.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        println!("\nSorted requests: {listed}");

        let request = PlanRequest {
            head,
            direction,
            tracks,
            range,
        };
        svc.ready()
            .await
            .map_err(|e| anyhow::anyhow!("planner unavailable: {e}"))?;
        match svc.call(request).await {
            Ok(plan) => render_plan(head, direction, &plan),
            Err(e) => eprintln!("scheduling failed: {e}"),
        }

        let again = read_line(
            &mut input,
            "\nWould you like to run another simulation? (Y/N): ",
        )
        .await?;
        println!();
        if !again.eq_ignore_ascii_case("y") {
            break;
        }
    }

    println!("Exiting program. Goodbye!");
    Ok(())
}
