use chip::{chip8::Machine, resources::Rom};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

const ROM_NAME: &str = "SPIN";

/// Counts V0 up, draws the digit of its low nibble and jumps back.
static BASE_ROM: once_cell::sync::Lazy<Rom> = once_cell::sync::Lazy::new(|| {
    get_rom(&[
        0x70, 0x01, // 0x200: V0 += 1
        0x81, 0x00, // 0x202: V1 = V0
        0x62, 0x0F, // 0x204: V2 = 0x0F
        0x81, 0x22, // 0x206: V1 &= V2
        0xF1, 0x29, // 0x208: I = glyph(V1)
        0xD3, 0x45, // 0x20A: draw
        0x12, 0x00, // 0x20C: jump 0x200
    ])
});

fn get_rom(data: &[u8]) -> Rom {
    Rom::new(ROM_NAME, data).expect("The benchmark rom is valid.")
}

/// will setup the default configured chip
fn get_default_chip() -> Machine {
    let mut chip = Machine::new();
    chip.load_rom(&BASE_ROM)
        .expect("The benchmark rom fits into memory.");
    chip
}

pub fn step_bench(c: &mut Criterion) {
    c.bench_function("step_bench", |b| {
        b.iter_batched_ref(
            get_default_chip,
            |chip| {
                for _ in 0..1000 {
                    let _ = chip.step();
                }
            },
            BatchSize::SmallInput,
        );
    });
}

pub fn print_bench(c: &mut Criterion) {
    let chip = get_default_chip();
    c.bench_function("print_bench", |b| {
        b.iter(|| {
            let _ = format!("{}", chip);
        });
    });
}

criterion_group!(benches, step_bench, print_bench);
criterion_main!(benches);
