/*
 * Labour Market Agent Simulation (LMAS)
 * Copyright (c)  2022. Sam Ralph
 *
 * This file is part of LMAS.
 *
 * LMAS is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, version 3 of the License.
 *
 * LMAS is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with LMAS.  If not, see <https://www.gnu.org/licenses/>.
 *
 */

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use labour_market_sim::{Economy, EconomyConfig, MetricsCollector};

fn simulate_year(c: &mut Criterion) {
    let config = EconomyConfig::default().with_seed(2022);

    c.bench_function("52 Weeks", |b| {
        b.iter(|| {
            let mut economy = Economy::new(config.clone()).expect("Failed to initialise economy");
            let mut collector = MetricsCollector::default();
            economy
                .simulate(black_box(52), &mut collector)
                .expect("Simulation failed");
            collector
        })
    });

    c.bench_function("Single Step", |b| {
        let mut economy = Economy::new(config.clone()).expect("Failed to initialise economy");
        b.iter(|| economy.step().expect("Step failed"))
    });
}

criterion_group!(benches, simulate_year);
criterion_main!(benches);
