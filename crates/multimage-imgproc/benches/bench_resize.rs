use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

use multimage_image::{Image, ImageSize};
use multimage_imgproc::{interpolation::InterpolationMode, resize};

fn random_image(size: ImageSize) -> Image<u8, 3> {
    let mut rng = rand::rng();
    let data = (0..size.area() * 3).map(|_| rng.random::<u8>()).collect();
    Image::new(size, data).unwrap()
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resize");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        // input image
        let image = random_image([*width, *height].into());
        let image_f32 = image.cast::<f32>().unwrap();

        // output image
        let new_size = ImageSize {
            width: width / 2,
            height: height / 2,
        };

        let out_f32 = Image::<f32, 3>::from_size_val(new_size, 0.0).unwrap();
        let out_u8 = Image::<u8, 3>::from_size_val(new_size, 0).unwrap();

        for mode in [InterpolationMode::Bilinear, InterpolationMode::Area] {
            group.bench_with_input(
                BenchmarkId::new(format!("native_{mode:?}"), &parameter_string),
                &(&image_f32, &out_f32),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| resize::resize_native(black_box(src), black_box(&mut dst), mode))
                },
            );

            group.bench_with_input(
                BenchmarkId::new(format!("fast_{mode:?}"), &parameter_string),
                &(&image, &out_u8),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| resize::resize_fast(black_box(src), black_box(&mut dst), mode))
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_resize);
criterion_main!(benches);
