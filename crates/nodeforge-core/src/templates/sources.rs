//! Static file contents written into generated projects

pub const DEFAULT_ENTRY: &str = r#"export function main(): void {
  console.log("Hello, world!");
}

main();
"#;

pub const EXPRESS_ENTRY: &str = r#"import express from "express";

const app = express();
const port = Number(process.env.PORT ?? 3000);

app.get("/", (_req, res) => {
  res.json({ message: "Hello, world!" });
});

app.listen(port, () => {
  console.log(`Server listening on http://localhost:${port}`);
});
"#;

pub const FASTIFY_ENTRY: &str = r#"import Fastify from "fastify";

const app = Fastify({ logger: true });
const port = Number(process.env.PORT ?? 3000);

app.get("/", async () => {
  return { message: "Hello, world!" };
});

app.listen({ port }).catch((err) => {
  app.log.error(err);
  process.exit(1);
});
"#;

pub const HONO_ENTRY: &str = r#"import { serve } from "@hono/node-server";
import { Hono } from "hono";

const app = new Hono();
const port = Number(process.env.PORT ?? 3000);

app.get("/", (c) => c.json({ message: "Hello, world!" }));

serve({ fetch: app.fetch, port }, (info) => {
  console.log(`Server listening on http://localhost:${info.port}`);
});
"#;

pub const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "ES2022",
    "module": "NodeNext",
    "moduleResolution": "NodeNext",
    "rootDir": "src",
    "outDir": "dist",
    "strict": true,
    "esModuleInterop": true,
    "skipLibCheck": true,
    "forceConsistentCasingInFileNames": true,
    "sourceMap": true
  },
  "include": ["src"]
}
"#;

pub const GITIGNORE: &str = "node_modules/
dist/
coverage/
.env
.env.*
*.log
.DS_Store
";

pub const ESLINT_CONFIG: &str = r#"import js from "@eslint/js";
import prettier from "eslint-config-prettier";
import tseslint from "typescript-eslint";

export default tseslint.config(
  { ignores: ["dist", "coverage"] },
  js.configs.recommended,
  ...tseslint.configs.recommended,
  prettier,
);
"#;

pub const PRETTIERRC: &str = r#"{
  "semi": true,
  "singleQuote": false,
  "trailingComma": "all",
  "printWidth": 100
}
"#;

pub const VITEST_CONFIG: &str = r#"import { defineConfig } from "vitest/config";

export default defineConfig({
  test: {
    include: ["test/**/*.test.ts"],
  },
});
"#;

pub const EXAMPLE_TEST: &str = r#"import { describe, expect, it } from "vitest";

describe("example", () => {
  it("adds numbers", () => {
    expect(1 + 1).toBe(2);
  });
});
"#;
