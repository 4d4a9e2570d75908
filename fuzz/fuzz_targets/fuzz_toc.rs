#![no_main]

use libfuzzer_sys::fuzz_target;
use lexis::utils::CollationKey;

fuzz_target!(|titles: Vec<String>| {
    // Keys must give a total order and bucketing must accept any title
    let mut keys: Vec<CollationKey> = titles.iter().map(|t| CollationKey::new(t)).collect();
    keys.sort();
    assert!(keys.windows(2).all(|w| w[0] <= w[1]));

    for title in &titles {
        let _ = lexis::toc::bucket_for(title);
    }
});
