use bucketset::{BoundedIntSet, BucketSet, SetConfig, Strategy};
use tracing_subscriber::EnvFilter;

fn main() -> bucketset::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    for strategy in [Strategy::Flat, Strategy::Chained] {
        let config = SetConfig::builder().strategy(strategy).build();
        let mut set = BucketSet::from_config(&config)?;

        set.add(1)?;
        set.add(2)?;
        assert!(set.contains(1));
        assert!(!set.contains(3));

        set.add(2)?;
        assert!(set.contains(2));

        set.remove(2);
        assert!(!set.contains(2));

        println!("{:?}: {:?}", strategy, set.stats());
    }

    Ok(())
}
