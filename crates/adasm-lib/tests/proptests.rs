use adasm_lib::builder::clean::{remove_low_depth, remove_singletons};
use adasm_lib::builder::ingest::window_range;
use adasm_lib::*;
use proptest::prelude::*;
use std::collections::HashMap;

/// Naive counter over decoded strings for baseline.
fn naive_counts(seqs: &[Vec<u8>], k: usize, anchor: Anchor, margin: usize) -> HashMap<String, u32> {
    let mut h = HashMap::new();
    for seq in seqs {
        let region: &[u8] = match anchor {
            Anchor::Start => &seq[..margin.min(seq.len())],
            Anchor::End => &seq[seq.len().saturating_sub(margin)..],
        };
        if region.len() < k {
            continue;
        }
        for window in region.windows(k) {
            let kmer: String = window
                .iter()
                .map(|&b| match b.to_ascii_uppercase() {
                    b @ (b'A' | b'C' | b'G' | b'T') => b as char,
                    _ => 'A',
                })
                .collect();
            *h.entry(kmer).or_default() += 1;
        }
    }
    h
}

fn anchor_strategy() -> impl Strategy<Value = Anchor> {
    prop_oneof![Just(Anchor::Start), Just(Anchor::End)]
}

proptest! {
    #[test]
    fn prop_codec_round_trip(seq in "[ACGT]{1,16}") {
        let codec = KmerCodec::new(seq.len()).unwrap();
        let code = codec.encode(seq.as_bytes());
        prop_assert!(code <= codec.mask());
        prop_assert_eq!(codec.decode(code), seq);
    }

    #[test]
    fn prop_codec_ignores_case(seq in "[acgtACGT]{1,16}") {
        let codec = KmerCodec::new(seq.len()).unwrap();
        let upper = seq.to_ascii_uppercase();
        prop_assert_eq!(codec.encode(seq.as_bytes()), codec.encode(upper.as_bytes()));
    }

    #[test]
    fn prop_window_range_inside_region(
        len in 0usize..400,
        k in 1usize..=16,
        margin in 0usize..300,
        anchor in anchor_strategy(),
    ) {
        let range = window_range(len, k, anchor, margin);
        for start in range {
            prop_assert!(start + k <= len);
            match anchor {
                Anchor::Start => prop_assert!(start + k <= margin),
                Anchor::End => prop_assert!(start + margin >= len),
            }
        }
    }

    #[test]
    fn prop_counts_match_naive(
        k in 1usize..=8,
        margin in 0usize..40,
        anchor in anchor_strategy(),
        seqs in prop::collection::vec(
            prop::collection::vec(prop::sample::select(b"ACGTNacgt".to_vec()), 0..60),
            0..8,
        ),
    ) {
        let baseline = naive_counts(&seqs, k, anchor, margin);
        let mut counts = KmerCounts::new(k).unwrap();
        let mut ingestor = builder::Ingestor::new(&mut counts, anchor, margin, builder::NoProgress);
        let summary = ingestor.ingest("prop", &seqs);

        prop_assert_eq!(summary.sequences, seqs.len() as u64);
        prop_assert_eq!(summary.windows, baseline.values().map(|&n| n as u64).sum::<u64>());
        prop_assert_eq!(counts.size(), baseline.len());
        for (kmer, &n) in &baseline {
            prop_assert_eq!(counts.count_of(counts.codec().encode(kmer.as_bytes())), n);
        }
    }

    #[test]
    fn prop_passes_leave_expected_graph(
        kmers in prop::collection::vec(("[ACGT]{4}", 1u32..20), 0..40),
        min_depth in 0u32..10,
    ) {
        let mut counts = KmerCounts::new(4).unwrap();
        for (kmer, depth) in &kmers {
            let code = counts.codec().encode(kmer.as_bytes());
            for _ in 0..*depth {
                counts.increment(code);
            }
        }

        remove_low_depth(&mut counts, min_depth);
        prop_assert!(counts.iter().all(|(_, n)| n >= min_depth));

        let before: Vec<KmerCode> = counts.sorted_codes();
        let removed = remove_singletons(&mut counts);
        prop_assert_eq!(before.len() - removed, counts.size());
        // survivors had a distinct neighbour before the pass
        for code in counts.sorted_codes() {
            let linked = |other: KmerCode| {
                downstream_of(code, 4).contains(&other) || downstream_of(other, 4).contains(&code)
            };
            prop_assert!(before.iter().any(|&other| other != code && linked(other)));
        }
    }
}

/// All four possible successors of `code`, present or not
fn downstream_of(code: KmerCode, k: usize) -> Vec<KmerCode> {
    let mask = (1u32 << (2 * k)) - 1;
    (0..4).map(|b| ((code << 2) & mask) | b).collect()
}
