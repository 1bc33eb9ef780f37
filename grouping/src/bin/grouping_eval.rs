use grouping::utils::*;
use grouping::{
    Assignment, Capacity, GroupShell, MutualAdjacency, PreferenceEdges, StudentId, balanced_assign,
    reset_and_random_assign, total_happiness,
};
use itertools::Itertools;
use num_format::{Locale, ToFormattedString};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

struct EvalClass {
    groups: Vec<GroupShell>,
    roster: Vec<StudentId>,
    preferences: PreferenceEdges,
    adjacency: MutualAdjacency,
}

struct HeuristicResults {
    name: &'static str,
    scores: Vec<usize>,
    best_score: usize,
    worst_score: usize,
    runs: u64,
}

struct BruteForceResults {
    partitions_checked: usize,
    best_score: usize,
    best_groups: Vec<Vec<StudentId>>,
}

fn compare_heuristics() {
    let class = make_eval_class();
    println!(
        "Students: {}, Groups: {}, Mutual pairs: {}\n",
        class.roster.len(),
        class.groups.len(),
        class.adjacency.pair_count()
    );

    let random_results = run_heuristic(&class, "RANDOM", 500, |class, rng| {
        reset_and_random_assign(&class.groups, &class.roster, rng)
    });
    print_heuristic_results(&random_results);

    let balanced_results = run_heuristic(&class, "BALANCED", 500, |class, rng| {
        balanced_assign(&class.groups, &class.roster, &class.preferences, rng)
    });
    print_heuristic_results(&balanced_results);

    println!("=== BRUTE FORCE EVALUATION ===");
    let brute_force_results = run_brute_force(&class);
    print_brute_force_results(&brute_force_results, &balanced_results);
}

/// Two friend circles of four plus a few cross-circle friendships, split
/// into three groups of three. The circles can't be kept whole, so the
/// optimum is not obvious.
fn make_eval_class() -> EvalClass {
    let groups = make_test_shells(3, Capacity::Limited(3));
    let roster = make_test_roster(9);
    let preferences = mutual_pairs(&[
        (1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4),
        (5, 6), (5, 7), (5, 8), (6, 7), (6, 8), (7, 8),
        (4, 5), (8, 9), (3, 9),
    ]);
    let adjacency = MutualAdjacency::build(&roster, &preferences);

    EvalClass {
        groups,
        roster,
        preferences,
        adjacency,
    }
}

fn run_heuristic<F>(class: &EvalClass, name: &'static str, runs: u64, assign: F) -> HeuristicResults
where
    F: Fn(&EvalClass, &mut StdRng) -> Assignment + Sync,
{
    let scores: Vec<usize> = (0..runs)
        .into_par_iter()
        .map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let assignment = assign(class, &mut rng);
            total_happiness(&assignment, &class.adjacency)
        })
        .collect();

    HeuristicResults {
        name,
        best_score: scores.iter().copied().max().unwrap_or(0),
        worst_score: scores.iter().copied().min().unwrap_or(0),
        scores,
        runs,
    }
}

fn run_brute_force(class: &EvalClass) -> BruteForceResults {
    let capacities: Vec<usize> = class
        .groups
        .iter()
        .map(|group| match group.capacity {
            Capacity::Limited(max) => max,
            Capacity::Unlimited => class.roster.len(),
        })
        .collect();

    let mut partitions = Vec::new();
    let mut current = Vec::new();
    generate_partitions_recursive(&class.roster, &capacities, &mut current, 0, &mut partitions);
    println!("Partitions to check: {}", partitions.len().to_formatted_string(&Locale::en));

    let best = partitions
        .par_iter()
        .map(|partition| (score_partition(class, partition), partition))
        .max_by_key(|(score, _)| *score);

    match best {
        Some((best_score, best_groups)) => BruteForceResults {
            partitions_checked: partitions.len(),
            best_score,
            best_groups: best_groups.clone(),
        },
        None => BruteForceResults {
            partitions_checked: 0,
            best_score: 0,
            best_groups: vec![],
        },
    }
}

// Every way to fill the groups in order, each group taking any subset of the
// students still left that fits its capacity
fn generate_partitions_recursive(
    remaining: &[StudentId],
    capacities: &[usize],
    current: &mut Vec<Vec<StudentId>>,
    group_idx: usize,
    result: &mut Vec<Vec<Vec<StudentId>>>,
) {
    if group_idx >= capacities.len() {
        result.push(current.clone());
        return;
    }

    let largest = capacities[group_idx].min(remaining.len());
    for size in 0..=largest {
        for members in remaining.iter().copied().combinations(size) {
            let rest: Vec<StudentId> = remaining
                .iter()
                .copied()
                .filter(|student| !members.contains(student))
                .collect();

            current.push(members);
            generate_partitions_recursive(&rest, capacities, current, group_idx + 1, result);
            current.pop();
        }
    }
}

fn score_partition(class: &EvalClass, partition: &[Vec<StudentId>]) -> usize {
    let mut assignment = Assignment::new(&class.groups, &class.roster);
    for (group, members) in class.groups.iter().zip(partition) {
        for student in members {
            assignment
                .place(*student, group.id)
                .expect("partitions are generated within capacity");
        }
    }
    total_happiness(&assignment, &class.adjacency)
}

fn print_heuristic_results(results: &HeuristicResults) {
    let sum = results.scores.iter().sum::<usize>();
    let avg = sum as f64 / results.runs as f64;

    println!("=== {} RESULTS ({} runs) ===", results.name, results.runs.to_formatted_string(&Locale::en));
    println!("Average happiness: {:.2}", avg);
    println!("Minimum happiness: {}", results.worst_score);
    println!("Maximum happiness: {}\n", results.best_score);
}

fn print_brute_force_results(brute_force_results: &BruteForceResults, balanced_results: &HeuristicResults) {
    println!(
        "Partitions checked: {}",
        brute_force_results.partitions_checked.to_formatted_string(&Locale::en)
    );
    println!("Optimal happiness: {}", brute_force_results.best_score);
    println!("Optimal groups: {:?}", brute_force_results.best_groups);

    let optimal_runs = balanced_results
        .scores
        .iter()
        .filter(|score| **score == brute_force_results.best_score)
        .count();
    println!(
        "Balanced runs reaching the optimum: {} of {}",
        optimal_runs.to_formatted_string(&Locale::en),
        balanced_results.runs.to_formatted_string(&Locale::en)
    );
}

fn main() {
    compare_heuristics();
}
