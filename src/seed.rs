//! Built-in example notes used when a session starts without prior data.

use chrono::{DateTime, TimeZone, Utc};

use crate::note::Note;

struct SeedNote {
    id: &'static str,
    title: &'static str,
    content: &'static str,
    tags: &'static [&'static str],
    // (year, month, day, hour) UTC; created and updated are equal
    stamp: (i32, u32, u32, u32),
}

const SEED: &[SeedNote] = &[
    SeedNote {
        id: "1",
        title: "React Performance Optimization",
        content: "Key performance optimization techniques:

1. Code Splitting
- Use React.lazy() for route-based splitting
- Implement dynamic imports for heavy components

2. Memoization
- useMemo for expensive calculations
- useCallback for function props
- React.memo for component optimization

3. Virtual List Implementation
- Use react-window for long lists
- Implement infinite scrolling

TODO: Benchmark current application and identify bottlenecks",
        tags: &["Dev", "React"],
        stamp: (2024, 10, 29, 10),
    },
    SeedNote {
        id: "2",
        title: "Japan Travel Planning",
        content: "Tokyo - 5 days
- Visit Senso-ji Temple
- Explore Shibuya Crossing
- Day trip to Mount Fuji

Kyoto - 3 days
- Fushimi Inari Shrine
- Bamboo Grove
- Traditional ryokan experience

Budget: $3000
Flight: $800
Accommodation: $1200
Food & Activities: $1000",
        tags: &["Travel", "Personal"],
        stamp: (2024, 10, 28, 9),
    },
    SeedNote {
        id: "3",
        title: "Favorite Pasta Recipes",
        content: "Carbonara
- 400g spaghetti
- 200g pancetta
- 4 egg yolks
- 100g Pecorino Romano
- Black pepper

Cacio e Pepe
- 400g tonnarelli
- 200g Pecorino Romano
- Black pepper
- Pasta water

Amatriciana
- 400g bucatini
- 150g guanciale
- 400g San Marzano tomatoes
- Pecorino Romano",
        tags: &["Cooking", "Recipes"],
        stamp: (2024, 10, 27, 8),
    },
    SeedNote {
        id: "4",
        title: "Weekly Workout Plan",
        content: "Monday - Chest & Triceps
- Bench Press 4x8-10
- Incline Dumbbell Press 3x10-12
- Tricep Dips 3x12-15
- Close-grip Bench Press 3x10-12

Wednesday - Back & Biceps
- Pull-ups 4x6-8
- Barbell Rows 4x8-10
- Lat Pulldowns 3x10-12
- Bicep Curls 3x12-15

Friday - Legs & Shoulders
- Squats 4x8-10
- Romanian Deadlifts 3x10-12
- Overhead Press 4x8-10
- Lateral Raises 3x12-15",
        tags: &["Dev", "React"],
        stamp: (2024, 10, 25, 7),
    },
    SeedNote {
        id: "5",
        title: "Meal Prep Ideas",
        content: "Sunday Prep:
- Grilled chicken breast (5 portions)
- Brown rice (2 cups cooked)
- Roasted vegetables (broccoli, bell peppers, carrots)
- Overnight oats for breakfast

Snack Options:
- Greek yogurt with berries
- Mixed nuts
- Apple with almond butter
- Protein smoothie

Shopping List:
- Chicken breast (2 lbs)
- Brown rice
- Fresh vegetables
- Greek yogurt
- Oats and fruits",
        tags: &["Cooking", "Health", "Recipes"],
        stamp: (2024, 10, 12, 6),
    },
    SeedNote {
        id: "6",
        title: "Reading List",
        content: "Currently Reading:
- \"Clean Code\" by Robert Martin
- \"The Psychology of Money\" by Morgan Housel

Next Up:
- \"Atomic Habits\" by James Clear
- \"Designing Data-Intensive Applications\" by Martin Kleppmann
- \"The Pragmatic Programmer\" by Andy Hunt

Fiction:
- \"Project Hail Mary\" by Andy Weir
- \"Klara and the Sun\" by Kazuo Ishiguro",
        tags: &["Personal", "Dev"],
        stamp: (2024, 10, 5, 5),
    },
    SeedNote {
        id: "7",
        title: "Fitness Goals 2025",
        content: "Strength Goals:
- Bench Press: 1.5x bodyweight
- Squat: 2x bodyweight
- Deadlift: 2.5x bodyweight
- Pull-ups: 15 consecutive

Endurance Goals:
- Run 5K under 25 minutes
- Complete a half marathon
- Swim 1km without stopping

Health Metrics:
- Body fat percentage: 12-15%
- Sleep: 7-8 hours nightly
- Water intake: 3L daily

Monthly Progress Reviews:
- Track workouts and PRs
- Body composition analysis
- Adjust nutrition plan",
        tags: &["Fitness", "Health", "Personal"],
        stamp: (2024, 9, 22, 4),
    },
];

fn seed_time((y, m, d, h): (i32, u32, u32, u32)) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().unwrap_or_default()
}

pub fn default_notes() -> Vec<Note> {
    SEED.iter()
        .map(|s| Note {
            id: s.id.to_string(),
            title: s.title.to_string(),
            content: s.content.to_string(),
            tags: s.tags.iter().map(|t| t.to_string()).collect(),
            created_at: seed_time(s.stamp),
            updated_at: seed_time(s.stamp),
            is_archived: false,
        })
        .collect()
}
