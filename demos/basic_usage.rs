/// Basic walkthrough of the media model
/// Run with: cargo run --example basic_usage

use shelf_core::media::{AudioTrack, BookMetadata, Book, MediaTypeMetadata, TrackCollection};
use shelf_core::RuntimeEnvironment;

fn main() -> shelf_core::Result<()> {
    println!("=== Shelf Core - Basic Usage ===\n");

    let mut book = Book::new(MediaTypeMetadata::Book(BookMetadata::titled("Dune")));
    book.set_audio_tracks(vec![
        AudioTrack::new_local(1, "lf_1", "Part 1", "/local/p1.mp3", "audio/mpeg", 10.0),
        AudioTrack::new_local(2, "lf_2", "Part 2", "/local/p2.mp3", "audio/mpeg", 20.0),
        AudioTrack::new_local(3, "lf_3", "Part 3", "/local/p3.mp3", "audio/mpeg", 5.0),
    ]);
    println!("✓ Three tracks, {:?} seconds", book.duration());

    book.remove_audio_track("lf_2");
    for track in book.audio_tracks() {
        println!(
            "  [{}] starts at {} ms, ends at {} ms",
            track.index,
            track.start_offset_ms(),
            track.end_offset_ms()
        );
    }
    println!("✓ Removed part 2, {:?} seconds left\n", book.duration());

    let env = RuntimeEnvironment::new("https://abs.example.com", "demo-token");
    println!("  Cover: {}", env.cover_uri("li_demo", Some("cover.jpg"))?);

    println!("\n=== Done ===");
    Ok(())
}
