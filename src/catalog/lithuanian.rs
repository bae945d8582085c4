use crate::models::Station;

/// Built-in Lithuanian stations, in display order.
pub fn stations() -> Vec<Station> {
    vec![
        Station::new(
            "zipfm",
            "ZIP FM",
            "Vilnius-based youth-oriented station playing the freshest global dance-pop hits and club rhythms.",
            "https://stream1.zipfm.lt/zipfm128.mp3",
            "LT",
        )
        .with_website("https://www.zipfm.lt/")
        .with_genre("Dance/Pop/Electronic"),
        Station::new(
            "zipfm-kasete",
            "ZIP FM (Iš Kasetės)",
            "Retro-vibed sub-station of ZIP FM, spinning 90s/00s club anthems and nostalgic dance hits.",
            "https://listen.radioking.com/radio/624418/stream/686608",
            "LT",
        )
        .with_website("https://www.zipfm.lt/")
        .with_genre("Retro/Dance/90s-Club"),
        Station::new(
            "m1",
            "M-1",
            "The first commercial radio station in Lithuania (since 1989) delivering mainstream pop hits, chart-toppers and today's favourites.",
            "https://radio.m-1.fm/m1/mp3",
            "LT",
        )
        .with_website("https://www.m1.lt/")
        .with_genre("Pop/Top 40"),
        Station::new(
            "m1-plius",
            "M-1 PLIUS",
            "M-1's adult-friendly channel offering softer hits, classic pop/rock and easy-listening favourites.",
            "https://radio.m-1.fm/m1plius/mp3",
            "LT",
        )
        .with_website("https://pliusas.15min.lt/")
        .with_genre("Adult Contemporary/Pop/Soft Rock"),
        Station::new(
            "m1-dance",
            "M-1 DANCE",
            "High-energy dance station by M-1 group, playing club-ready house, electronic hits and remix culture 24/7.",
            "https://radio.m-1.fm/m-1dance/mp3",
            "LT",
        )
        .with_website("https://m-1dance.15min.lt/")
        .with_genre("Electronic/House/Dance"),
        Station::new(
            "m1-laluna",
            "LALUNA",
            "Klaipėda's feel-good pop station with beachy vibes, summer anthems and daily hits for the coastal crowd.",
            "https://radio.m-1.fm/laluna/mp3",
            "LT",
        )
        .with_website("https://laluna.15min.lt/")
        .with_genre("Pop/Top 40/Feel-Good"),
        Station::new(
            "m1-lietus",
            "Lietus",
            "Lithuanian-language music station: domestic pop classics, nostalgic hits and beloved local songs for the national audience.",
            "https://radio.m-1.fm/lietus/mp3",
            "LT",
        )
        .with_website("https://lietus.15min.lt/")
        .with_genre("Lithuanian Pop/Classic Hits"),
    ]
}
