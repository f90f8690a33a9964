//! Basic example demonstrating the Canvas API client.
//!
//! Run with:
//! ```
//! cargo run --example basic -- https://canvas.example.edu your-api-token
//! ```

use canvasapi::{AssignmentEditParams, CanvasClient, Course, Get};

#[tokio::main]
async fn main() -> canvasapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let base_url = args.next().unwrap_or_else(|| {
        eprintln!("usage: basic <base-url> <api-token>");
        std::process::exit(2);
    });
    let token = args.next().unwrap_or_else(|| {
        eprintln!("usage: basic <base-url> <api-token>");
        std::process::exit(2);
    });

    println!("Creating Canvas client...");
    let client = CanvasClient::new(&token, &base_url)?;
    println!("Connected to: {}", client.base_url());

    // Get a course
    println!("\n--- Getting Course ---");
    let course = Course::get(&client, 1).await?;
    println!("Course: {course}");
    println!("  Code: {}", course.course_code.as_deref().unwrap_or("unknown"));
    println!("  State: {}", course.workflow_state.as_deref().unwrap_or("unknown"));

    // Walk the course's assignments page by page
    println!("\n--- Listing Assignments ---");
    let mut assignments = course.assignments(&client).per_page(10);
    while let Some(page) = assignments.next_page().await? {
        for assignment in &page {
            println!(
                "  - {} ({:.1} points)",
                assignment,
                assignment.points_possible.unwrap_or(0.0)
            );
        }
    }

    // Rename the first assignment and change it back
    println!("\n--- Editing an Assignment ---");
    let all = course.assignments(&client).collect_all().await?;
    if let Some(first) = all.first() {
        let original_name = first.name.clone();
        let edited = first
            .edit(
                &client,
                AssignmentEditParams {
                    name: Some("Renamed by example".to_string()),
                    ..Default::default()
                },
            )
            .await?;
        println!("Renamed to: {:?}", edited.name);

        edited
            .edit(
                &client,
                AssignmentEditParams {
                    name: original_name,
                    ..Default::default()
                },
            )
            .await?;
        println!("Restored original name");
    }

    // Explore the course's outcome tree
    println!("\n--- Outcome Groups ---");
    let root = course.root_outcome_group(&client).await?;
    println!("Root group: {root}");

    let links = root.linked_outcomes(&client).collect_all().await?;
    println!("Linked outcomes: {}", links.len());
    for link in links.iter().take(5) {
        println!("  - {link}");
    }

    println!("\nDone!");
    Ok(())
}
